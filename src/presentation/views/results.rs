// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 按类别选择的结果模板

use crate::domain::models::category::Category;
use crate::domain::models::search_result::ResultRecord;
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;
use std::cmp::Ordering;
use url::Url;

const DIVIDER: &str = "<hr class=\"divider\">\n";

/// 渲染某一类别的结果列表
pub fn render_results(category: Category, records: &[ResultRecord]) -> String {
    match category {
        Category::Text => render_text(records),
        Category::News => render_news(records),
        Category::Videos => render_videos(records),
        Category::Images => render_images(records),
        _ => render_generic(records),
    }
}

/// 结果标题：类别名 + 查询
pub fn render_heading(category: Category, query: &str) -> String {
    format!(
        "<p class=\"results-heading\"><strong>{} Results for <code>{}</code></strong></p>\n",
        category.label(),
        encode_text(query)
    )
}

fn text_of(record: &ResultRecord, key: &str) -> String {
    record.str_field(key).unwrap_or_default()
}

fn attr(value: &str) -> String {
    encode_double_quoted_attribute(value).into_owned()
}

/// 仅接受 http/https 链接；其他协议（如 `javascript:`）不得进入 `href`/`src`
pub fn web_url(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

fn render_text(records: &[ResultRecord]) -> String {
    let mut html = String::from("<section class=\"results results-text\">\n");
    for (idx, record) in records.iter().enumerate() {
        if idx > 0 {
            html.push_str(DIVIDER);
        }
        html.push_str(&format!(
            "<article>\n<h3>{}</h3>\n<p class=\"caption\">{}</p>\n<p>{}</p>\n</article>\n",
            encode_text(&text_of(record, "title")),
            encode_text(&text_of(record, "href")),
            encode_text(&text_of(record, "body")),
        ));
    }
    html.push_str("</section>\n");
    html
}

fn parsed_date(record: &ResultRecord) -> Option<DateTime<Utc>> {
    let raw = record.str_field("date")?;
    DateTime::parse_from_rfc3339(&raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn newest_first(a: &ResultRecord, b: &ResultRecord) -> Ordering {
    match (parsed_date(a), parsed_date(b)) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => text_of(b, "date").cmp(&text_of(a, "date")),
    }
}

/// 新闻按日期从新到旧排列，与提供方返回顺序无关；无法解析的日期排在最后
pub fn news_in_display_order(records: &[ResultRecord]) -> Vec<&ResultRecord> {
    let mut ordered: Vec<&ResultRecord> = records.iter().collect();
    ordered.sort_by(|a, b| newest_first(a, b));
    ordered
}

fn render_news(records: &[ResultRecord]) -> String {
    let mut html = String::from("<section class=\"results results-news\">\n");
    for (idx, record) in news_in_display_order(records).into_iter().enumerate() {
        if idx > 0 {
            html.push_str(DIVIDER);
        }
        html.push_str("<article class=\"columns\">\n<div class=\"col-main\">\n");
        html.push_str(&format!(
            "<h3>{}</h3>\n<p class=\"caption\">{}</p>\n<p class=\"caption\">{}</p>\n<p>{}</p>\n",
            encode_text(&text_of(record, "title")),
            encode_text(&text_of(record, "date")),
            encode_text(&text_of(record, "url")),
            encode_text(&text_of(record, "body")),
        ));
        html.push_str("</div>\n<div class=\"col-side\">\n");
        if let Some(image) = record.str_field("image").as_deref().and_then(web_url) {
            html.push_str(&format!("<img src=\"{}\" alt=\"\">\n", attr(image.as_str())));
        }
        html.push_str("</div>\n</article>\n");
    }
    html.push_str("</section>\n");
    html
}

fn nested_url(images: &serde_json::Map<String, Value>, key: &str) -> Option<Url> {
    images.get(key).and_then(Value::as_str).and_then(web_url)
}

fn render_videos(records: &[ResultRecord]) -> String {
    let mut html = String::from("<section class=\"results results-videos\">\n");
    for (idx, record) in records.iter().enumerate() {
        if idx > 0 {
            html.push_str(DIVIDER);
        }
        html.push_str("<article>\n");
        let title = encode_text(&text_of(record, "title")).into_owned();
        match record.str_field("content").as_deref().and_then(web_url) {
            Some(link) => html.push_str(&format!(
                "<a class=\"link-button\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>\n",
                attr(link.as_str()),
                title,
            )),
            None => html.push_str(&format!(
                "<p class=\"link-button\">{}</p>\n<p class=\"caption\">{}</p>\n",
                title,
                encode_text(&text_of(record, "content")),
            )),
        }
        if let Some(images) = record.object_field("images") {
            if let Some(large) = nested_url(images, "large") {
                html.push_str(&format!("<img src=\"{}\" alt=\"\">\n", attr(large.as_str())));
            }
            if let Some(motion) = nested_url(images, "motion") {
                html.push_str(&format!(
                    "<video controls muted preload=\"none\" src=\"{}\"></video>\n",
                    attr(motion.as_str())
                ));
            }
        }
        html.push_str("</article>\n");
    }
    html.push_str("</section>\n");
    html
}

fn render_images(records: &[ResultRecord]) -> String {
    let mut html = String::from("<section class=\"results results-images image-grid\">\n");
    for record in records {
        let Some(image) = record.str_field("image").as_deref().and_then(web_url) else {
            continue;
        };
        html.push_str(&format!(
            "<figure>\n<img src=\"{}\" alt=\"{}\">\n<figcaption class=\"caption\">{}</figcaption>\n</figure>\n",
            attr(image.as_str()),
            attr(&text_of(record, "title")),
            encode_text(&text_of(record, "title")),
        ));
    }
    html.push_str("</section>\n");
    html
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 其他类别：逐条列出字段与取值
fn render_generic(records: &[ResultRecord]) -> String {
    let mut html = String::from("<section class=\"results results-generic\">\n");
    if records.is_empty() {
        html.push_str("<p class=\"caption\">No results.</p>\n");
    }
    for record in records {
        html.push_str("<dl class=\"record\">\n");
        for (key, value) in record.fields() {
            html.push_str(&format!(
                "<dt>{}</dt><dd>{}</dd>\n",
                encode_text(key),
                encode_text(&render_value(value)),
            ));
        }
        html.push_str("</dl>\n");
    }
    html.push_str("</section>\n");
    html
}
