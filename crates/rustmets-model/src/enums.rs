//! Closed enumerations used by METS attributes.
//!
//! Every enumeration is a fixed set of (variant, wire token) pairs. Encoding is
//! total; decoding an unknown token fails with [`ModelError::InvalidEnumValue`].
//! Matching is exact: no case folding, no trimming.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Common behaviour of every closed METS enumeration.
pub trait MetsEnum: Sized + Copy + 'static {
    /// Attribute name used in error messages (e.g. `"CHECKSUMTYPE"`).
    const KIND: &'static str;

    /// Every member, in schema order.
    const ALL: &'static [Self];

    /// The canonical wire token.
    fn as_str(&self) -> &'static str;

    /// Decode a wire token.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidEnumValue`] for tokens outside the set.
    fn from_token(token: &str) -> Result<Self, ModelError> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.as_str() == token)
            .ok_or_else(|| ModelError::InvalidEnumValue {
                kind: Self::KIND,
                token: token.to_owned(),
            })
    }
}

macro_rules! mets_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl MetsEnum for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }

        impl $name {
            /// Returns the wire token of this member.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                MetsEnum::as_str(self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_token(s)
            }
        }
    };
}

mets_enum! {
    /// Checksum algorithm named by `CHECKSUMTYPE`.
    ChecksumType ("CHECKSUMTYPE") {
        Adler32 => "Adler-32",
        Crc32 => "CRC32",
        Haval => "HAVAL",
        Md5 => "MD5",
        Mnp => "MNP",
        Sha1 => "SHA-1",
        Sha256 => "SHA-256",
        Sha384 => "SHA-384",
        Sha512 => "SHA-512",
        Tiger => "TIGER",
        Whirlpool => "WHIRLPOOL",
    }
}

mets_enum! {
    /// Metadata format named by `MDTYPE` on `mdRef`/`mdWrap`.
    MdType ("MDTYPE") {
        Marc => "MARC",
        Mods => "MODS",
        Ead => "EAD",
        Dc => "DC",
        NisoImg => "NISOIMG",
        LcAv => "LC-AV",
        Vra => "VRA",
        TeiHdr => "TEIHDR",
        Ddi => "DDI",
        Fgdc => "FGDC",
        Lom => "LOM",
        Premis => "PREMIS",
        PremisObject => "PREMIS:OBJECT",
        PremisAgent => "PREMIS:AGENT",
        PremisRights => "PREMIS:RIGHTS",
        PremisEvent => "PREMIS:EVENT",
        TextMd => "TEXTMD",
        MetsRights => "METSRIGHTS",
        Iso19115Nap => "ISO 19115:2003 NAP",
        Other => "OTHER",
    }
}

mets_enum! {
    /// Kind of locator held in `xlink:href`, named by `LOCTYPE`.
    LocType ("LOCTYPE") {
        Ark => "ARK",
        Urn => "URN",
        Url => "URL",
        Purl => "PURL",
        Handle => "HANDLE",
        Doi => "DOI",
        Other => "OTHER",
    }
}

mets_enum! {
    /// `xlink:type`; METS only allows simple links on locators.
    XlinkType ("xlink:type") {
        Simple => "simple",
    }
}

mets_enum! {
    /// `xlink:show`.
    Show ("xlink:show") {
        New => "new",
        Replace => "replace",
        Embed => "embed",
        Other => "other",
        None => "none",
    }
}

mets_enum! {
    /// `xlink:actuate`.
    Actuate ("xlink:actuate") {
        OnLoad => "onLoad",
        OnRequest => "onRequest",
        Other => "other",
        None => "none",
    }
}

mets_enum! {
    /// Role of a header agent (`ROLE`).
    AgentRole ("ROLE") {
        Creator => "CREATOR",
        Editor => "EDITOR",
        Archivist => "ARCHIVIST",
        Preservation => "PRESERVATION",
        Disseminator => "DISSEMINATOR",
        Custodian => "CUSTODIAN",
        IpOwner => "IPOWNER",
        Other => "OTHER",
    }
}

mets_enum! {
    /// Kind of a header agent (`TYPE` on `agent`).
    AgentType ("TYPE") {
        Individual => "INDIVIDUAL",
        Organization => "ORGANIZATION",
        Other => "OTHER",
    }
}

mets_enum! {
    /// Begin/end syntax of a `file` or `stream`; only byte offsets are allowed.
    FileBeType ("BETYPE") {
        Byte => "BYTE",
    }
}

mets_enum! {
    /// Transformation needed to recover a file (`TRANSFORMTYPE`).
    TransformType ("TRANSFORMTYPE") {
        Decompression => "decompression",
        Decryption => "decryption",
    }
}

mets_enum! {
    /// Shape of an `area` (`SHAPE`).
    Shape ("SHAPE") {
        Rect => "RECT",
        Circle => "CIRCLE",
        Poly => "POLY",
    }
}

mets_enum! {
    /// Begin/end syntax of an `area` (`BETYPE`).
    BeType ("BETYPE") {
        Byte => "BYTE",
        IdRef => "IDREF",
        Smil => "SMIL",
        Midi => "MIDI",
        Smpte25 => "SMPTE-25",
        Smpte24 => "SMPTE-24",
        SmpteDf30 => "SMPTE-DF30",
        SmpteNdf30 => "SMPTE-NDF30",
        SmpteDf2997 => "SMPTE-DF29.97",
        SmpteNdf2997 => "SMPTE-NDF29.97",
        Time => "TIME",
        Tcf => "TCF",
        Xptr => "XPTR",
    }
}

mets_enum! {
    /// Extent syntax of an `area` (`EXTTYPE`).
    ExtType ("EXTTYPE") {
        Byte => "BYTE",
        Smil => "SMIL",
        Midi => "MIDI",
        Smpte25 => "SMPTE-25",
        Smpte24 => "SMPTE-24",
        SmpteDf30 => "SMPTE-DF30",
        SmpteNdf30 => "SMPTE-NDF30",
        SmpteDf2997 => "SMPTE-DF29.97",
        SmpteNdf2997 => "SMPTE-NDF29.97",
        Time => "TIME",
        Tcf => "TCF",
    }
}
