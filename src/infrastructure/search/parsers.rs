// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! DuckDuckGo 响应解析
//!
//! 与网络无关的纯函数，便于用固定样本做单元测试

use crate::domain::models::search_result::ResultRecord;
use crate::domain::search::provider::ProviderError;
use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::collections::HashSet;
use url::{form_urlencoded, Url};

static VQD_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r#"vqd="([^"]+)""#).expect("Failed to compile vqd regex"),
        Regex::new(r#"vqd='([^']+)'"#).expect("Failed to compile vqd regex"),
        Regex::new(r#"vqd=([0-9-]+)&"#).expect("Failed to compile vqd regex"),
    ]
});

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("Failed to compile HTML clean regex"));

const TEXT_PAYLOAD_START: &str = "DDG.pageLayout.load('d',";
const TEXT_PAYLOAD_END: &str = ");DDG.duckbar.load(";

/// 从首页响应中提取 vqd 令牌
pub fn extract_vqd(body: &str, query: &str) -> Result<String, ProviderError> {
    VQD_PATTERNS
        .iter()
        .find_map(|re| re.captures(body).and_then(|c| c.get(1)))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ProviderError::Token(query.to_string()))
}

/// 去除 HTML 标签并解码实体
pub fn clean_html_text(html: &str) -> String {
    let stripped = HTML_TAG.replace_all(html, "");
    html_escape::decode_html_entities(&stripped).trim().to_string()
}

/// 还原 URL 中的百分号编码，空格按 `+` 处理
pub fn normalize_url(raw: &str) -> String {
    let spaced = raw.replace(' ', "+");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// 解析 `d.js` 文本搜索结果
///
/// 负载形如 `DDG.pageLayout.load('d',[...]);DDG.duckbar.load(...)`；
/// 含 `n` 的行为下一页标记，跳过；同一链接只保留第一次出现
pub fn parse_text_api(
    body: &str,
    query: &str,
    max_results: usize,
) -> Result<Vec<ResultRecord>, ProviderError> {
    let start = body
        .find(TEXT_PAYLOAD_START)
        .map(|idx| idx + TEXT_PAYLOAD_START.len())
        .ok_or_else(|| ProviderError::Decode("d.js payload marker not found".to_string()))?;
    let rest = &body[start..];
    let end = rest
        .find(TEXT_PAYLOAD_END)
        .or_else(|| rest.rfind("])").map(|idx| idx + 1))
        .ok_or_else(|| ProviderError::Decode("d.js payload is truncated".to_string()))?;

    let rows: Vec<Value> = serde_json::from_str(&rest[..end])
        .map_err(|e| ProviderError::Decode(format!("d.js payload: {e}")))?;

    let google_fallback = format!("http://www.google.com/search?q={query}");
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for row in &rows {
        if row.get("n").is_some() {
            continue;
        }
        let Some(href) = row.get("u").and_then(Value::as_str) else {
            continue;
        };
        if href.is_empty() || href == google_fallback || !seen.insert(href.to_string()) {
            continue;
        }
        let body = clean_html_text(row.get("a").and_then(Value::as_str).unwrap_or_default());
        if body.is_empty() {
            continue;
        }
        let title = clean_html_text(row.get("t").and_then(Value::as_str).unwrap_or_default());

        results.push(
            ResultRecord::new()
                .with("title", title)
                .with("href", normalize_url(href))
                .with("body", body),
        );
        if results.len() >= max_results {
            break;
        }
    }

    Ok(results)
}

/// 解析无脚本 HTML 搜索页
pub fn parse_text_html(html: &str, max_results: usize) -> Result<Vec<ResultRecord>, ProviderError> {
    let document = Html::parse_document(html);
    let result_sel = selector(".result:not(.result--ad), .web-result:not(.result--ad)")?;
    let title_sel = selector(".result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };
        let title = title_el.text().collect::<String>().trim().to_string();
        let Some(href) = title_el.value().attr("href").and_then(unwrap_redirect) else {
            continue;
        };
        if title.is_empty() || !seen.insert(href.clone()) {
            continue;
        }
        let body = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        results.push(
            ResultRecord::new()
                .with("title", title)
                .with("href", href)
                .with("body", body),
        );
        if results.len() >= max_results {
            break;
        }
    }

    Ok(results)
}

fn selector(css: &str) -> Result<Selector, ProviderError> {
    Selector::parse(css).map_err(|e| ProviderError::Decode(format!("invalid selector {css}: {e:?}")))
}

/// 展开 `//duckduckgo.com/l/?uddg=...` 跳转链接
fn unwrap_redirect(href: &str) -> Option<String> {
    let full = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    let parsed = Url::parse(&full).ok()?;
    if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned())
    } else if full.starts_with("http") {
        Some(full)
    } else {
        None
    }
}

/// 解析即时答案接口
///
/// 先取摘要答案，再展开相关主题；分组主题的名称写入 `topic`
pub fn parse_answers(json: &Value) -> Vec<ResultRecord> {
    let mut results = Vec::new();

    if let Some(text) = json.get("AbstractText").and_then(Value::as_str) {
        if !text.is_empty() {
            results.push(
                ResultRecord::new()
                    .with("icon", Value::Null)
                    .with("text", text)
                    .with("topic", Value::Null)
                    .with("url", string_or_null(json.get("AbstractURL"))),
            );
        }
    }

    let related = json
        .get("RelatedTopics")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for row in related {
        match row.get("Name").and_then(Value::as_str) {
            Some(topic) if !topic.is_empty() => {
                let subtopics = row
                    .get("Topics")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                for sub in subtopics {
                    results.push(answer_record(sub, Value::from(topic)));
                }
            }
            _ => {
                if row.get("FirstURL").and_then(Value::as_str).is_some() {
                    results.push(answer_record(row, Value::Null));
                }
            }
        }
    }

    results
}

fn answer_record(row: &Value, topic: Value) -> ResultRecord {
    let icon = row
        .get("Icon")
        .and_then(|icon| icon.get("URL"))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(Value::from)
        .unwrap_or(Value::Null);

    ResultRecord::new()
        .with("icon", icon)
        .with("text", string_or_null(row.get("Text")))
        .with("topic", topic)
        .with("url", string_or_null(row.get("FirstURL")))
}

fn string_or_null(value: Option<&Value>) -> Value {
    value
        .and_then(Value::as_str)
        .map(Value::from)
        .unwrap_or(Value::Null)
}

/// `news.js`/`i.js`/`v.js` 的分页响应
#[derive(Debug, Default)]
pub struct JsonPage {
    pub rows: Vec<Map<String, Value>>,
    /// 下一页的 `s` 偏移量
    pub next_offset: Option<String>,
}

pub fn parse_json_page(body: &str) -> Result<JsonPage, ProviderError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::Decode(format!("JSON page: {e}")))?;

    let rows = json
        .get("results")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().filter_map(|r| r.as_object().cloned()).collect())
        .unwrap_or_default();

    let next_offset = json
        .get("next")
        .and_then(Value::as_str)
        .and_then(next_offset);

    Ok(JsonPage { rows, next_offset })
}

/// 从 `next` 链接的查询串中取出 `s` 参数（翻页偏移量）
pub fn next_offset(next: &str) -> Option<String> {
    let (_, query) = next.split_once('?')?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "s")
        .map(|(_, offset)| offset.into_owned())
        .filter(|offset| !offset.is_empty())
}

/// 新闻行映射：`excerpt` 改名为 `body`，Unix 时间戳转为 RFC 3339
pub fn news_record(row: &Map<String, Value>) -> Option<ResultRecord> {
    let url = row.get("url").and_then(Value::as_str)?;
    let date = row
        .get("date")
        .and_then(Value::as_i64)
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| Value::from(dt.to_rfc3339_opts(SecondsFormat::Secs, false)))
        .unwrap_or(Value::Null);

    Some(
        ResultRecord::new()
            .with("date", date)
            .with("title", str_of(row, "title"))
            .with("body", clean_html_text(&str_of(row, "excerpt")))
            .with("url", normalize_url(url))
            .with("image", str_of(row, "image"))
            .with("source", str_of(row, "source")),
    )
}

pub fn image_record(row: &Map<String, Value>) -> Option<ResultRecord> {
    let image = row.get("image").and_then(Value::as_str)?;
    Some(
        ResultRecord::new()
            .with("title", str_of(row, "title"))
            .with("image", normalize_url(image))
            .with("thumbnail", normalize_url(&str_of(row, "thumbnail")))
            .with("url", normalize_url(&str_of(row, "url")))
            .with("height", row.get("height").cloned().unwrap_or(Value::Null))
            .with("width", row.get("width").cloned().unwrap_or(Value::Null))
            .with("source", str_of(row, "source")),
    )
}

/// 视频行原样保留，只要求存在 `content` 链接
pub fn video_record(row: &Map<String, Value>) -> Option<ResultRecord> {
    row.get("content").and_then(Value::as_str)?;
    Some(ResultRecord::from(row.clone()))
}

/// 视频、新闻、图片按各自的主链接去重
pub fn dedup_key(record: &ResultRecord, field: &str) -> Option<String> {
    record.str_field(field)
}

pub fn parse_suggestions(json: &Value) -> Vec<ResultRecord> {
    json.as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row.get("phrase").and_then(Value::as_str))
                .map(|phrase| ResultRecord::new().with("phrase", phrase))
                .collect()
        })
        .unwrap_or_default()
}

pub fn parse_translation(json: &Value, original: &str) -> Result<ResultRecord, ProviderError> {
    let translated = json
        .get("translated")
        .and_then(Value::as_str)
        .ok_or_else(|| ProviderError::Decode("translation missing `translated`".to_string()))?;

    Ok(ResultRecord::new()
        .with(
            "detected_language",
            string_or_null(json.get("detected_language")),
        )
        .with("translated", translated)
        .with("original", original))
}

fn str_of(row: &Map<String, Value>, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
