pub fn run() {
    print!("{}", listing());
}

pub fn listing() -> String {
    let langs = selectree_langs::all();
    let mut out = format!("Supported languages ({}):\n", langs.len());
    for lang in langs {
        out.push_str("  ");
        out.push_str(lang.name());
        out.push('\n');
    }
    out
}
