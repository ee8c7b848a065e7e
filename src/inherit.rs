//! Inheritance of missing group fields.

use crate::config::SeoDescriptor;
use crate::value::FieldGroup;

/// Fill absent or empty `keys` in `group` from the route descriptor's shared
/// fields, falling back to the mount defaults' shared fields. Precedence is
/// strict: an explicit group value always wins, the route-level default beats
/// the static default, and a key with no source anywhere stays unset.
pub fn inherit(
    group: &mut FieldGroup,
    keys: &[&str],
    route: &SeoDescriptor,
    global: &SeoDescriptor,
) {
    for &key in keys {
        if group.get(key).is_some_and(|value| !value.is_empty()) {
            continue;
        }
        let fallback = route
            .shared_field(key)
            .filter(|value| !value.is_empty())
            .or_else(|| global.shared_field(key).filter(|value| !value.is_empty()));
        if let Some(value) = fallback {
            group.insert(key.to_string(), value.clone());
        }
    }
}
