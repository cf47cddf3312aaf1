//! Closed tag sets used to steer generation.
//!
//! Every selector a caller can pass (property kind, output flavor, publishing
//! strategy, and so on) is an enum parsed through a fixed tag table. Parsing
//! is total: a tag outside the table resolves to the enum's default variant,
//! so every dispatch point downstream is a plain exhaustive `match`.
//!
//! # Examples
//!
//! ```
//! use hypergraph_core::{Flavor, PropertyKind, Strategy};
//!
//! assert_eq!(PropertyKind::parse("Email"), PropertyKind::Email);
//! assert_eq!(PropertyKind::parse("Geometry"), PropertyKind::Text);
//! assert_eq!(Flavor::parse("vanilla-js"), Flavor::VanillaJs);
//! assert_eq!(Strategy::parse("nightly"), Strategy::Immediate);
//! ```

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Declares a tag enum with a lookup table and a default fallback.
///
/// Tags compare ASCII case-insensitively. Serialization writes the canonical
/// tag; the JSON Schema lists every canonical tag as an enumeration.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident (default = $default:ident) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $tag:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the canonical tag for this variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }

            /// Resolves a tag, falling back to the default variant.
            #[must_use]
            pub fn parse(tag: &str) -> Self {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(tag.trim()))
                    .unwrap_or_default()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                Self::parse(tag)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let tag = Cow::<'de, str>::deserialize(deserializer)?;
                Ok(Self::parse(&tag))
            }
        }

        impl JsonSchema for $name {
            fn schema_name() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($name))
            }

            fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
                let tags: Vec<&str> = Self::ALL.iter().map(|variant| variant.as_str()).collect();
                json_schema!({
                    "type": "string",
                    "enum": tags,
                    "default": Self::$default.as_str()
                })
            }
        }
    };
}

tag_enum! {
    /// Property kind of an entity field.
    ///
    /// Unrecognized kinds are generated as [`PropertyKind::Text`].
    pub enum PropertyKind (default = Text) {
        /// Free-form string
        Text => "Text",
        /// Numeric value
        Number => "Number",
        /// Boolean flag
        Checkbox => "Checkbox",
        /// Point in time
        Date => "Date",
        /// Text constrained to an email address
        Email => "Email",
        /// Text constrained to a URL
        Url => "URL",
        /// Arbitrary structured data
        Json => "JSON",
    }
}

tag_enum! {
    /// Output flavor of generated code.
    pub enum Flavor (default = React) {
        /// Component-based UI code using React hooks
        React => "react",
        /// Plain typed classes
        TypeScript => "typescript",
        /// Minimal-runtime JavaScript classes
        VanillaJs => "vanilla-js",
    }
}

tag_enum! {
    /// Publishing strategy template.
    pub enum Strategy (default = Immediate) {
        /// Validate, preview, publish one item at once
        Immediate => "immediate",
        /// Queue items and publish them in fixed-size chunks
        Batch => "batch",
        /// Publish items when their `publishAt` time is reached
        Scheduled => "scheduled",
        /// Gate publication behind conditions and an approval quorum
        Conditional => "conditional",
    }
}

tag_enum! {
    /// Cardinality of a relation.
    pub enum Cardinality (default = OneToMany) {
        /// Single related entity
        OneToOne => "one-to-one",
        /// List of related entities
        OneToMany => "one-to-many",
        /// List of related entities on both sides
        ManyToMany => "many-to-many",
    }
}

tag_enum! {
    /// Filter operator applied to a property in a query.
    pub enum FilterOperator (default = Is) {
        /// Equality
        Is => "is",
        /// Negation
        Not => "not",
        /// Substring match
        Contains => "contains",
        /// Prefix match
        StartsWith => "startsWith",
        /// Suffix match
        EndsWith => "endsWith",
        /// Greater than
        Gt => "gt",
        /// Greater than or equal
        Gte => "gte",
        /// Less than
        Lt => "lt",
        /// Less than or equal
        Lte => "lte",
    }
}

tag_enum! {
    /// Which spaces a query reads from.
    pub enum QueryMode (default = Private) {
        /// The user's private space
        Private => "private",
        /// Public spaces
        Public => "public",
        /// Private and public side by side
        Both => "both",
    }
}

tag_enum! {
    /// Which provider layers to generate.
    pub enum ProviderType (default = Both) {
        /// Application provider only
        App => "app",
        /// Space provider only
        Space => "space",
        /// Application and space providers
        Both => "both",
    }
}

tag_enum! {
    /// Authentication method.
    pub enum AuthMethod (default = GeoConnect) {
        /// Geo Connect wallet redirect flow
        GeoConnect => "geo-connect",
        /// Caller-supplied authentication provider
        Custom => "custom",
    }
}

tag_enum! {
    /// Project framework for quickstart scaffolding.
    pub enum ProjectFramework (default = React) {
        /// React single-page application with Vite
        React => "react",
        /// Next.js application
        NextJs => "nextjs",
        /// Vanilla TypeScript with Vite
        VanillaTs => "vanilla-ts",
        /// Express API server
        ExpressApi => "express-api",
    }
}

tag_enum! {
    /// Visibility of a space.
    pub enum SpaceType (default = Private) {
        /// Visible to invited members only
        Private => "private",
        /// Visible to everyone
        Public => "public",
    }
}

tag_enum! {
    /// Knowledge base category filter.
    pub enum KnowledgeCategory (default = All) {
        /// Getting started material
        Quickstart => "quickstart",
        /// Entities, spaces, and the data model
        CoreConcepts => "core-concepts",
        /// Geo Connect and sessions
        Authentication => "authentication",
        /// Public and private spaces
        Spaces => "spaces",
        /// Entity schemas
        Schema => "schema",
        /// Query hooks
        Queries => "queries",
        /// Provider components
        Providers => "providers",
        /// Knowledge graph mappings
        Mapping => "mapping",
        /// Publishing to public spaces
        Publishing => "publishing",
        /// Advanced patterns
        Advanced => "advanced",
        /// No category restriction
        All => "all",
    }
}

impl Flavor {
    /// Returns `true` for flavors that emit UI components.
    #[must_use]
    pub const fn is_component_based(self) -> bool {
        matches!(self, Self::React)
    }
}

impl Cardinality {
    /// Returns `true` when the relation points at a list of entities.
    #[must_use]
    pub const fn is_list(self) -> bool {
        !matches!(self, Self::OneToOne)
    }
}

impl QueryMode {
    /// Concrete modes queried for this selection, in emission order.
    #[must_use]
    pub const fn modes(self) -> &'static [&'static str] {
        match self {
            Self::Private => &["private"],
            Self::Public => &["public"],
            Self::Both => &["private", "public"],
        }
    }
}

impl ProviderType {
    /// Returns `true` when the application provider is generated.
    #[must_use]
    pub const fn includes_app(self) -> bool {
        matches!(self, Self::App | Self::Both)
    }

    /// Returns `true` when the space provider is generated.
    #[must_use]
    pub const fn includes_space(self) -> bool {
        matches!(self, Self::Space | Self::Both)
    }
}
