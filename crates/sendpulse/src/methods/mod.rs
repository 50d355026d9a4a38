//! Endpoint namespaces.
//!
//! Each namespace is a static table of [`MethodDescriptor`]s expanded at
//! compile time into a borrowed handle type with one `async fn` per
//! endpoint. Handles are `Copy` and their calls take `self`, so the returned
//! futures borrow only the client. The handles only expose calls, so the set
//! of operations is fixed once the crate is built.
//!
//! [`Namespace`] offers the same tables keyed by name, for callers that pick
//! the operation at runtime (the CLI does).

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::transport::HttpMethod;

/// One API operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub method: HttpMethod,
    /// Path relative to the host, with `{{name}}` placeholders
    pub path: &'static str,
    /// Operation name, e.g. `getOne`
    pub name: &'static str,
    /// Fields sent as JSON-encoded strings
    pub serialize: &'static [&'static str],
}

macro_rules! namespace {
    (
        $(#[$meta:meta])*
        $handle:ident => $key:literal {
            $(
                $(#[$fn_meta:meta])*
                $fn_name:ident = $verb:ident $path:literal as $op:literal
                    $(, serialize [$($field:literal),* $(,)?])?
            );* $(;)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $handle<'a> {
            client: &'a $crate::client::Client,
        }

        impl<'a> $handle<'a> {
            /// Namespace name
            pub const NAME: &'static str = $key;

            /// Every operation of this namespace
            pub const DESCRIPTORS: &'static [$crate::methods::MethodDescriptor] = &[
                $(
                    $crate::methods::MethodDescriptor {
                        method: $crate::transport::HttpMethod::$verb,
                        path: $path,
                        name: $op,
                        serialize: &[$($($field),*)?],
                    },
                )*
            ];

            pub(crate) fn new(client: &'a $crate::client::Client) -> Self {
                Self { client }
            }

            $(
                $(#[$fn_meta])*
                pub async fn $fn_name(
                    self,
                    params: serde_json::Value,
                ) -> $crate::error::Result<serde_json::Value> {
                    self.client
                        .request(
                            $crate::transport::HttpMethod::$verb,
                            $path,
                            params,
                            &[$($($field),*)?],
                        )
                        .await
                }
            )*
        }
    };
}

mod addressbooks;
mod balance;
mod blacklist;
mod campaigns;
mod emails;
mod senders;
mod templates;

pub use addressbooks::AddressBooks;
pub use balance::Balance;
pub use blacklist::Blacklist;
pub use campaigns::Campaigns;
pub use emails::Emails;
pub use senders::Senders;
pub use templates::Templates;

/// Endpoint group, for dispatch by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    AddressBooks,
    Campaigns,
    Templates,
    Senders,
    Emails,
    Blacklist,
    Balance,
}

impl Namespace {
    pub const ALL: [Namespace; 7] = [
        Namespace::AddressBooks,
        Namespace::Campaigns,
        Namespace::Templates,
        Namespace::Senders,
        Namespace::Emails,
        Namespace::Blacklist,
        Namespace::Balance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Namespace::AddressBooks => AddressBooks::NAME,
            Namespace::Campaigns => Campaigns::NAME,
            Namespace::Templates => Templates::NAME,
            Namespace::Senders => Senders::NAME,
            Namespace::Emails => Emails::NAME,
            Namespace::Blacklist => Blacklist::NAME,
            Namespace::Balance => Balance::NAME,
        }
    }

    pub fn descriptors(&self) -> &'static [MethodDescriptor] {
        match self {
            Namespace::AddressBooks => AddressBooks::DESCRIPTORS,
            Namespace::Campaigns => Campaigns::DESCRIPTORS,
            Namespace::Templates => Templates::DESCRIPTORS,
            Namespace::Senders => Senders::DESCRIPTORS,
            Namespace::Emails => Emails::DESCRIPTORS,
            Namespace::Blacklist => Blacklist::DESCRIPTORS,
            Namespace::Balance => Balance::DESCRIPTORS,
        }
    }

    /// Look up an operation by its wire name
    pub fn descriptor(&self, operation: &str) -> Option<&'static MethodDescriptor> {
        self.descriptors().iter().find(|d| d.name == operation)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Namespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownNamespace(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn operation_names_are_unique_per_namespace() {
        for ns in Namespace::ALL {
            let names: HashSet<_> = ns.descriptors().iter().map(|d| d.name).collect();
            assert_eq!(names.len(), ns.descriptors().len(), "duplicate in {}", ns);
        }
    }

    #[test]
    fn serialized_fields_are_never_path_params() {
        for ns in Namespace::ALL {
            for d in ns.descriptors() {
                for field in d.serialize {
                    let placeholder = format!("{{{{{}}}}}", field);
                    assert!(!d.path.contains(&placeholder), "{}.{}", ns, d.name);
                }
            }
        }
    }

    #[test]
    fn lookup_by_name() {
        let ns: Namespace = "addressbooks".parse().unwrap();
        let d = ns.descriptor("getOne").unwrap();
        assert_eq!(d.method, HttpMethod::Get);
        assert_eq!(d.path, "addressbooks/{{id}}");

        let create_email = ns.descriptor("createEmail").unwrap();
        assert_eq!(create_email.serialize, &["emails"]);

        assert!(ns.descriptor("nope").is_none());
        assert!("nope".parse::<Namespace>().is_err());
    }

    #[test]
    fn namespace_names_round_trip() {
        for ns in Namespace::ALL {
            assert_eq!(ns.name().parse::<Namespace>().unwrap(), ns);
        }
    }
}
