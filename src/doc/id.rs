//! Opaque identifiers for documents, lines and segments.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Draw the next value from the process-wide monotonic counter.
fn next_raw() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Allocate a fresh identifier.
            #[must_use]
            pub fn fresh() -> Self {
                Self(next_raw())
            }

            /// Raw numeric value, for logging and event payloads.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a [`Segment`](crate::doc::Segment).
    SegmentId
);
opaque_id!(
    /// Identifier of a [`Line`](crate::doc::Line).
    LineId
);
opaque_id!(
    /// Identifier of a [`Document`](crate::doc::Document).
    DocumentId
);
