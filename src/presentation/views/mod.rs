// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 页面渲染
//!
//! 整个界面是一张页面：搜索表单、操作符帮助开关和当前会话保存的结果

pub mod operators;
pub mod results;

use crate::domain::models::category::Category;
use crate::infrastructure::session::session_store::SessionState;
use html_escape::{encode_double_quoted_attribute, encode_text};

const PAGE_TITLE: &str = "DuckDuckGo Search";

const STYLE: &str = r#"body{font-family:sans-serif;margin:0 auto;max-width:1200px;padding:1rem 2rem}
form.search{display:flex;gap:.5rem;align-items:center;flex-wrap:wrap}
form.search input[type=text]{flex:1;min-width:16rem}
.caption{color:#666;font-size:.85rem}
.error{color:#a00;border:1px solid #a00;padding:.5rem}
.divider{border:0;border-top:1px solid #ddd}
.columns{display:flex;gap:1rem}
.col-main{flex:3}
.col-side{flex:1}
.col-side img,.image-grid img{max-width:100%}
.image-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(180px,1fr));gap:1rem}
.link-button{display:inline-block;padding:.4rem .8rem;border:1px solid #888;border-radius:4px}
video{max-width:100%}"#;

/// 页面渲染上下文
#[derive(Debug, Default)]
pub struct PageContext<'a> {
    /// 表单中预选的类别
    pub selected: Option<&'a str>,
    /// 表单中预填的查询
    pub query: &'a str,
    pub show_operators: bool,
    /// 校验提示；存在时不渲染结果
    pub error: Option<&'a str>,
    pub session: Option<&'a SessionState>,
}

impl<'a> PageContext<'a> {
    /// 以会话中保存的提交作为表单初值
    pub fn from_session(session: Option<&'a SessionState>, show_operators: bool) -> Self {
        Self {
            selected: session.map(|s| s.category.as_str()),
            query: session.map(|s| s.query.as_str()).unwrap_or_default(),
            show_operators,
            error: None,
            session,
        }
    }
}

fn open_document(html: &mut String) {
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{PAGE_TITLE}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n<h1>{PAGE_TITLE}</h1>\n"
    ));
}

fn close_document(html: &mut String) {
    html.push_str("</body>\n</html>\n");
}

fn render_form(html: &mut String, ctx: &PageContext<'_>) {
    html.push_str("<form class=\"search\" method=\"post\" action=\"/search\">\n");
    html.push_str("<select name=\"category\" aria-label=\"Category\">\n");
    for category in Category::ALL {
        let selected = if ctx.selected == Some(category.as_str()) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{tag}\"{selected}>{tag}</option>\n",
            tag = category.as_str()
        ));
    }
    html.push_str("</select>\n");
    html.push_str(&format!(
        "<input type=\"text\" name=\"query\" aria-label=\"Query\" placeholder=\"Query\" value=\"{}\">\n",
        encode_double_quoted_attribute(ctx.query)
    ));
    let checked = if ctx.show_operators { " checked" } else { "" };
    html.push_str(&format!(
        "<label><input type=\"checkbox\" name=\"operators\"{checked}> Show search operators</label>\n"
    ));
    html.push_str("<button type=\"submit\">Submit</button>\n</form>\n");
}

/// 渲染完整页面
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut html = String::new();
    open_document(&mut html);
    render_form(&mut html, ctx);

    if ctx.show_operators {
        html.push_str(&operators::render_operators_table());
    }

    if let Some(message) = ctx.error {
        html.push_str(&format!("<p class=\"error\">{}</p>\n", encode_text(message)));
    } else if let Some(session) = ctx.session {
        html.push_str(&results::render_heading(session.category, &session.query));
        html.push_str(&results::render_results(session.category, &session.results));
    }

    close_document(&mut html);
    html
}

/// 渲染失败页面（未知类别、提供方错误）
pub fn render_error_page(title: &str, message: &str) -> String {
    let mut html = String::new();
    open_document(&mut html);
    html.push_str(&format!(
        "<h2>{}</h2>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to search</a></p>\n",
        encode_text(title),
        encode_text(message)
    ));
    close_document(&mut html);
    html
}
