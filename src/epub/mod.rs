pub mod error;
pub mod ncx;
pub mod opf;
pub mod reader;

// 重新导出错误处理
pub use error::{EpubError, Result, require};

// 重新导出EPUB读取器
pub use reader::{Epub, PACKAGE_OPF};

// 重新导出OPF相关
pub use opf::{BookMetadata, ManifestItem, Metadata, Opf, SpineItem};

// 重新导出NCX相关
pub use ncx::{Content, Ncx, TableOfContents};
