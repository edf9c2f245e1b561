// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use html_escape::encode_text;

/// DuckDuckGo 查询操作符示例：(关键词示例, 效果)
pub const SEARCH_OPERATORS: [(&str, &str); 9] = [
    ("cats dogs", "Results about cats or dogs"),
    (
        "\"cats and dogs\"",
        "Results for exact term \"cats and dogs\". If no results are found, related results are shown.",
    ),
    ("cats -dogs", "Fewer dogs in results"),
    ("cats +dogs", "More dogs in results"),
    (
        "cats filetype:pdf",
        "PDFs about cats. Supported file types: pdf, doc(x), xls(x), ppt(x), html",
    ),
    ("dogs site:example.com", "Pages about dogs from example.com"),
    (
        "cats -site:example.com",
        "Pages about cats, excluding example.com",
    ),
    ("intitle:dogs", "Page title includes the word \"dogs\""),
    ("inurl:cats", "Page url includes the word \"cats\""),
];

pub fn render_operators_table() -> String {
    let mut html = String::from(
        "<table class=\"operators\">\n<thead><tr><th>Keywords example</th><th>Result</th></tr></thead>\n<tbody>\n",
    );
    for (example, result) in SEARCH_OPERATORS {
        html.push_str(&format!(
            "<tr><td><code>{}</code></td><td>{}</td></tr>\n",
            encode_text(example),
            encode_text(result)
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html
}
