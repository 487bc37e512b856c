/// Neutralizes markup in a string field: script-capable tags and attributes
/// are dropped and stray `<`/`>` are escaped. A literal `&` is kept as typed,
/// so plain text round-trips unchanged.
pub fn clean(input: &str) -> String {
    ammonia::clean(input).replace("&amp;", "&")
}

pub fn clean_opt(input: Option<String>) -> Option<String> {
    input.map(|value| clean(&value))
}
