//! 目录构建模块
//!
//! 将解析后的NCX导航树转换为可序列化的目录结构（toc.json的内容）。
//! 转换采用严格校验：任一导航点缺少必需元素时整个转换失败，
//! 返回指明元素路径的错误，而不是跳过该节点。

use crate::epub::error::{EpubError, Result, require};
use crate::epub::ncx::navigation::NavPoint;
use serde::Serialize;

/// 目录节点
///
/// 无子节点时`contents`为None，序列化后不输出该键。
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// 标题文本
    pub text: String,
    /// 目标文件路径
    pub href: String,
    /// 子节点，保持文档顺序
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<Content>>,
}

/// 目录输出记录(toc.json的内容)
#[derive(Debug, Clone, Serialize)]
pub struct TableOfContents {
    /// 书籍标题(来自ncx.docTitle)
    pub title: String,
    /// 顶层目录节点
    pub contents: Vec<Content>,
}

/// 递归转换导航点列表为目录节点列表
///
/// 每个导航点必须具备navLabel、navLabel.text、content和
/// content的src属性；任一缺失即返回错误，整组转换作废。
/// 嵌套子导航点递归转换，文档顺序在每一层保持不变。
pub fn contents_from_nav_points(nav_points: &[NavPoint]) -> Result<Vec<Content>> {
    let mut contents = Vec::with_capacity(nav_points.len());

    for nav_point in nav_points {
        let nav_label = require(nav_point.nav_label.as_ref(), "ncx.navPoint.navLabel")?;
        let text = require(nav_label.text.clone(), "ncx.navPoint.navLabel.text")?;
        let content = require(nav_point.content.as_ref(), "ncx.navPoint.content")?;
        let href = content.src.clone().ok_or_else(|| EpubError::MissingAttribute {
            element: "ncx.navPoint.content".to_string(),
            attribute: "src".to_string(),
        })?;

        let children = if nav_point.children.is_empty() {
            None
        } else {
            Some(contents_from_nav_points(&nav_point.children)?)
        };

        contents.push(Content {
            text,
            href,
            contents: children,
        });
    }

    Ok(contents)
}
