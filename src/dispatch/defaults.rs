//! Built-in extension to formatter table

/// (extensions, commands): primary command first, fallbacks after
pub const DEFAULT_BINDINGS: &[(&[&str], &[&str])] = &[
    (&[".cs"], &["dotnet format whitespace --include {file}"]),
    (&[".rs"], &["rustfmt {file}"]),
    (
        &[".cpp", ".c", ".h", ".hpp", ".cc"],
        &["clang-format -i {file}"],
    ),
    (&[".lua"], &["stylua {file}"]),
    (&[".sh", ".bash"], &["shfmt -w {file}"]),
    (&[".py"], &["ruff format {file}", "black -q {file}"]),
    (
        &[
            ".ts", ".tsx", ".js", ".jsx", ".json", ".css", ".scss", ".md", ".yaml", ".yml",
        ],
        &["prettier --write {file}"],
    ),
    (&[".go"], &["gofmt -w {file}"]),
    (&[".rb"], &["rubocop -a {file}"]),
    (&[".swift"], &["swift-format -i {file}"]),
];
