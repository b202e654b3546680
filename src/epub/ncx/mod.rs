//! NCX（Navigation Control file for XML）文件解析模块
//!
//! 此模块提供EPUB文件中NCX导航控制文件的解析功能，
//! 以及向目录输出结构（toc.json）的转换。

pub mod navigation;
pub mod parser;
pub mod toc;

// 重新导出公共类型以保持API兼容性
pub use navigation::{DocTitle, NavContent, NavLabel, NavMap, NavPoint};
pub use parser::Ncx;
pub use toc::{Content, TableOfContents, contents_from_nav_points};
