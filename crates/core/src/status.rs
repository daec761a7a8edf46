//! Status labels reported by the remote job service.
//!
//! Job-level and step-level statuses are independent label spaces that
//! happen to share the same informal shape. Both serialize as plain
//! lowercase strings; labels this client does not recognise are kept
//! verbatim in an `Other` variant so a snapshot always round-trips.

use serde::{Deserialize, Serialize};

macro_rules! define_label_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A label not known to this client, preserved as received.
            Other(String),
        }

        impl $name {
            /// The wire label for this status.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::Other(label) => label.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                match label.as_str() {
                    $( $label => Self::$variant, )+
                    _ => Self::Other(label),
                }
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                Self::from(label.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(label) => label,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_label_enum! {
    /// Job-level lifecycle status.
    JobStatus {
        Pending = "pending",
        Queued = "queued",
        Running = "running",
        Done = "done",
        Failed = "failed",
    }
}

define_label_enum! {
    /// Status of a single step inside a job.
    StepStatus {
        Pending = "pending",
        Queued = "queued",
        Running = "running",
        Done = "done",
        Failed = "failed",
    }
}

impl JobStatus {
    /// Whether no further transition can follow this status.
    ///
    /// Unknown labels are treated as non-terminal so polling continues.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}
