//! Shared utilities.

mod value;

pub(crate) use value::{
    canonical_string, defined, field, is_nil, key_fragment, kind_label, values_equal,
};
