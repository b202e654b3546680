//! HTML合并模块
//!
//! 按脊柱的线性阅读顺序遍历XHTML页面，把各页的head子元素
//! (去重、不含title)与body子元素(保持顺序)合并为一个文档。

use crate::epub::error::{EpubError, Result};
use crate::epub::opf::Opf;
use crate::epub::reader::Epub;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

static HEAD_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("head").unwrap());
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// 合并文档累加器
///
/// head片段按插入顺序保存并按序列化形式去重，body片段
/// 按遍历顺序保存；两者在`finalize`时拼装为完整文档。
#[derive(Debug, Default)]
pub struct MergedDocument {
    heads: Vec<String>,
    seen_heads: HashSet<String>,
    bodies: Vec<String>,
}

impl MergedDocument {
    /// 创建空的合并文档
    pub fn new() -> Self {
        Self {
            heads: Vec::new(),
            seen_heads: HashSet::new(),
            bodies: Vec::new(),
        }
    }

    /// 合并一个XHTML页面
    ///
    /// head中除title外的子元素去重后追加；body的顶层子元素
    /// 按文档顺序追加。
    pub fn push_page(&mut self, html: &str) {
        let document = Html::parse_document(html);

        if let Some(head) = document.select(&HEAD_SELECTOR).next() {
            for child in head.children().filter_map(ElementRef::wrap) {
                if child.value().name() == "title" {
                    continue;
                }
                let markup = child.html();
                // 多个页面通常重复相同的样式表/meta引用，只保留首次出现
                if self.seen_heads.insert(markup.clone()) {
                    self.heads.push(markup);
                }
            }
        }

        if let Some(body) = document.select(&BODY_SELECTOR).next() {
            for child in body.children().filter_map(ElementRef::wrap) {
                self.bodies.push(child.html());
            }
        }
    }

    /// 已合并的body片段数量
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// 拼装最终的合并文档
    pub fn finalize(&self) -> String {
        let heads = self.heads.join("\n");
        let bodies = self.bodies.join("\n");
        [
            "<html>",
            "<head>",
            heads.as_str(),
            "</head>",
            "<body>",
            bodies.as_str(),
            "</body>",
            "</html>",
        ]
        .join("\n")
    }
}

/// 遍历脊柱并合并所有线性页面
///
/// 遍历顺序为脊柱的文档顺序；linear="no"的项跳过。每个线性项
/// 必须解析到清单中的XHTML条目，且路径位于`content_dir`之下，
/// 否则返回策略错误。
pub fn merge_spine(
    epub: &mut Epub,
    opf: &Opf,
    package_root: &str,
    content_dir: &str,
) -> Result<MergedDocument> {
    let mut merged = MergedDocument::new();
    let content_prefix = format!("{}/", content_dir);

    for spine_item in &opf.spine {
        if !spine_item.is_linear() {
            continue;
        }

        let item = opf
            .manifest
            .get(&spine_item.idref)
            .ok_or_else(|| EpubError::MissingEntry(spine_item.idref.clone()))?;

        if !item.is_xhtml() {
            return Err(EpubError::NonHtmlSpineItem {
                idref: item.id.clone(),
                media_type: item.media_type.clone(),
            });
        }
        // 所有内容页必须位于content_dir之下，合并后文档中的相对
        // 资源路径才能保持有效
        if !item.href.starts_with(&content_prefix) {
            return Err(EpubError::NonStandardPath(item.href.clone()));
        }

        let entry_path = format!("{}/{}", package_root, item.href);
        if !epub.has_entry(&entry_path) {
            return Err(EpubError::MissingEntry(item.href.clone()));
        }
        let html = epub.read_text(&entry_path)?;
        merged.push_page(&html);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_ONE: &str = r#"<html>
<head>
    <title>第一页</title>
    <meta charset="utf-8"/>
    <link rel="stylesheet" href="../css/style.css"/>
</head>
<body>
    <h1>第一章</h1>
    <p>第一页内容</p>
</body>
</html>"#;

    const PAGE_TWO: &str = r#"<html>
<head>
    <title>第二页</title>
    <meta charset="utf-8"/>
</head>
<body>
    <p>第二页内容</p>
</body>
</html>"#;

    #[test]
    fn test_head_elements_deduplicated() {
        let mut merged = MergedDocument::new();
        merged.push_page(PAGE_ONE);
        merged.push_page(PAGE_TWO);

        let html = merged.finalize();
        let charset_count = html.matches("charset=\"utf-8\"").count();
        assert_eq!(charset_count, 1);
    }

    #[test]
    fn test_title_excluded_from_head() {
        let mut merged = MergedDocument::new();
        merged.push_page(PAGE_ONE);

        let html = merged.finalize();
        assert!(!html.contains("<title>"));
        assert!(html.contains("stylesheet"));
    }

    #[test]
    fn test_bodies_concatenated_in_order() {
        let mut merged = MergedDocument::new();
        merged.push_page(PAGE_ONE);
        merged.push_page(PAGE_TWO);

        assert_eq!(merged.body_count(), 3);
        let html = merged.finalize();
        let first = html.find("第一页内容").unwrap();
        let second = html.find("第二页内容").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_finalize_wraps_in_document_skeleton() {
        let mut merged = MergedDocument::new();
        merged.push_page(PAGE_ONE);

        let html = merged.finalize();
        assert!(html.starts_with("<html>\n<head>\n"));
        assert!(html.ends_with("</body>\n</html>"));
    }

    #[test]
    fn test_empty_document() {
        let merged = MergedDocument::new();
        let html = merged.finalize();
        assert!(html.contains("<head>"));
        assert!(html.contains("<body>"));
    }
}
