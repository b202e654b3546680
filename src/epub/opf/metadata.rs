//! 元数据处理模块
//!
//! 提供EPUB元数据的收集结构与输出记录定义。

use crate::epub::error::{EpubError, Result, require};
use serde::Serialize;
use std::collections::HashMap;

/// OPF文件中的原始元数据集合
///
/// key为去掉命名空间前缀的标签本地名（如"title"、"creator"），
/// value为该标签的全部文本内容，保持文档顺序。
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    dublin_core: HashMap<String, Vec<String>>,
}

impl Metadata {
    /// 创建新的元数据集合
    pub fn new() -> Self {
        Self {
            dublin_core: HashMap::new(),
        }
    }

    /// 添加Dublin Core元数据
    pub fn add_dublin_core(&mut self, tag: String, value: String) {
        self.dublin_core.entry(tag).or_default().push(value);
    }

    /// 获取指定标签的第一个文本内容
    pub fn first(&self, tag: &str) -> Option<String> {
        self.dublin_core
            .get(tag)
            .and_then(|values| values.first())
            .cloned()
    }

    /// 获取指定标签的全部文本内容(文档顺序)
    pub fn all(&self, tag: &str) -> Vec<String> {
        self.dublin_core.get(tag).cloned().unwrap_or_default()
    }
}

/// 书籍元数据输出记录
///
/// metadata.json的内容：除creators外均取对应Dublin Core元素
/// 的第一个实例，creators按文档顺序收集全部dc:creator。
#[derive(Debug, Clone, Serialize)]
pub struct BookMetadata {
    pub title: String,
    pub publisher: String,
    pub creators: Vec<String>,
    pub date: String,
    pub identifier: String,
    pub language: String,
    pub description: String,
    pub rights: String,
    pub source: String,
    #[serde(rename = "type")]
    pub book_type: String,
}

impl BookMetadata {
    /// 从原始元数据集合构建输出记录
    ///
    /// 任一必需元素缺失时返回指明完整元素路径的错误，
    /// 如 "package.metadata.dc:title"。
    pub fn from_metadata(metadata: &Metadata) -> Result<BookMetadata> {
        let creators = metadata.all("creator");
        if creators.is_empty() {
            return Err(EpubError::MissingElement(
                "package.metadata.dc:creator".to_string(),
            ));
        }

        Ok(BookMetadata {
            title: Self::required(metadata, "title")?,
            publisher: Self::required(metadata, "publisher")?,
            creators,
            date: Self::required(metadata, "date")?,
            identifier: Self::required(metadata, "identifier")?,
            language: Self::required(metadata, "language")?,
            description: Self::required(metadata, "description")?,
            rights: Self::required(metadata, "rights")?,
            source: Self::required(metadata, "source")?,
            book_type: Self::required(metadata, "type")?,
        })
    }

    fn required(metadata: &Metadata, tag: &str) -> Result<String> {
        require(
            metadata.first(tag),
            &format!("package.metadata.dc:{}", tag),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_metadata() -> Metadata {
        let mut metadata = Metadata::new();
        for (tag, value) in [
            ("title", "Analytical Engine Primer"),
            ("publisher", "Lovelace Press"),
            ("date", "1843-09-01"),
            ("identifier", "urn:isbn:9780000000000"),
            ("language", "en"),
            ("description", "Notes on the engine."),
            ("rights", "Public Domain"),
            ("source", "manuscript"),
            ("type", "Text"),
        ] {
            metadata.add_dublin_core(tag.to_string(), value.to_string());
        }
        metadata.add_dublin_core("creator".to_string(), "Ada Lovelace".to_string());
        metadata.add_dublin_core("creator".to_string(), "Charles Babbage".to_string());
        metadata
    }

    #[test]
    fn test_from_metadata_complete() {
        let book = BookMetadata::from_metadata(&full_metadata()).unwrap();
        assert_eq!(book.title, "Analytical Engine Primer");
        assert_eq!(book.book_type, "Text");
    }

    #[test]
    fn test_creators_preserve_document_order() {
        let book = BookMetadata::from_metadata(&full_metadata()).unwrap();
        assert_eq!(book.creators, vec!["Ada Lovelace", "Charles Babbage"]);
    }

    #[test]
    fn test_first_takes_first_instance() {
        let mut metadata = full_metadata();
        metadata.add_dublin_core("title".to_string(), "第二个标题".to_string());
        let book = BookMetadata::from_metadata(&metadata).unwrap();
        assert_eq!(book.title, "Analytical Engine Primer");
    }

    #[test]
    fn test_missing_title_names_element_path() {
        let mut metadata = Metadata::new();
        metadata.add_dublin_core("creator".to_string(), "某作者".to_string());
        match BookMetadata::from_metadata(&metadata) {
            Err(EpubError::MissingElement(path)) => {
                assert_eq!(path, "package.metadata.dc:title");
            }
            other => panic!("期望MissingElement错误, 得到: {:?}", other),
        }
    }

    #[test]
    fn test_no_creators_is_fatal() {
        let mut metadata = full_metadata();
        metadata = {
            // 重建一份不含creator的集合
            let mut without = Metadata::new();
            for tag in [
                "title",
                "publisher",
                "date",
                "identifier",
                "language",
                "description",
                "rights",
                "source",
                "type",
            ] {
                for value in metadata.all(tag) {
                    without.add_dublin_core(tag.to_string(), value);
                }
            }
            without
        };
        match BookMetadata::from_metadata(&metadata) {
            Err(EpubError::MissingElement(path)) => {
                assert_eq!(path, "package.metadata.dc:creator");
            }
            other => panic!("期望MissingElement错误, 得到: {:?}", other),
        }
    }

    #[test]
    fn test_serialized_key_is_type() {
        let json = serde_json::to_string(&BookMetadata::from_metadata(&full_metadata()).unwrap())
            .unwrap();
        assert!(json.contains("\"type\":\"Text\""));
        assert!(!json.contains("book_type"));
    }
}
