use regex::Regex;

/// Collapses whitespace and rewrites `?` placeholders into Postgres `$n`
/// parameters, so wide INSERT statements can be written without counting
/// positional arguments by hand.
pub fn sql(query: &str) -> String {
    let collapsed = query.split_whitespace().collect::<Vec<&str>>().join(" ");
    let placeholder = Regex::new(r"\?").unwrap();

    let mut out = collapsed;
    let mut index = 1;
    while let Some(found) = placeholder.find(&out) {
        let numbered = format!("${}", index);
        out.replace_range(found.range(), &numbered);
        index += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_placeholders_in_order() {
        assert_eq!(
            sql("INSERT INTO t (a, b) VALUES (?, ?)"),
            "INSERT INTO t (a, b) VALUES ($1, $2)"
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sql("SELECT\n    a,\n    b\nFROM t"), "SELECT a, b FROM t");
    }
}
