//! Case conversion between configuration keys (snake_case) and wire keys (camelCase).

/// Convert a configuration field name to its wire name.
/// e.g. "redirect_uris" -> "redirectUris", "id_token_signed_response_alg" -> "idTokenSignedResponseAlg"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, segment) in s.split('_').enumerate() {
        if i == 0 {
            out.push_str(&segment.to_lowercase());
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Convert a wire name back to a configuration field name.
/// e.g. "redirectUris" -> "redirect_uris", "mapFrom" -> "map_from"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
