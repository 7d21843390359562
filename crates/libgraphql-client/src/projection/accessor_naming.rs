/// Convert a response key into the name its accessor is exposed under:
/// `firstName` → `first_name`, `HTMLUrl` → `html_url`, `login_url` stays
/// as-is.
pub fn to_snake_case(response_key: &str) -> String {
    let chars: Vec<char> = response_key.chars().collect();
    let mut out = String::with_capacity(response_key.len() + 4);
    for (i, ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|prev| chars[prev]);
            let next = chars.get(i + 1);
            let starts_word = match prev {
                None | Some('_') => false,
                Some(prev) if prev.is_ascii_lowercase() || prev.is_ascii_digit() => true,
                Some(prev) if prev.is_ascii_uppercase() =>
                    next.is_some_and(|next| next.is_ascii_lowercase()),
                Some(_) => false,
            };
            if starts_word {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(*ch);
        }
    }
    out
}
