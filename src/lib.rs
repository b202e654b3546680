pub mod convert;
pub mod epub;

// === 核心API重新导出 ===

/// EPUB文件读取器
pub use epub::Epub;

/// 错误处理
pub use epub::{EpubError, Result};

// === 数据结构 ===

/// 书籍元数据输出记录(metadata.json)
pub use epub::BookMetadata;

/// 目录输出结构(toc.json)
pub use epub::{Content, TableOfContents};

// === 底层组件（高级用法） ===

/// OPF组件
pub use epub::{ManifestItem, Metadata, Opf, SpineItem};

/// NCX组件
pub use epub::Ncx;

/// 转换管线
pub use convert::{ConvertConfig, Converter, MergedDocument, OutputWriter};

// === 库信息 ===

/// epub2json库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// epub2json库的描述
pub const DESCRIPTION: &str = "一个将EPUB文件转换为JSON和合并HTML的Rust工具";

// === 便捷函数 ===

/// 快速打开EPUB文件
///
/// 这是 `Epub::from_path` 的便捷包装函数。
///
/// # 参数
/// * `path` - EPUB文件路径
///
/// # 返回值
/// * `Result<Epub>` - EPUB实例
pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Epub> {
    Epub::from_path(path)
}

/// 把EPUB文件转换为输出目录中的JSON与合并HTML产物
///
/// 这是 `Converter::run` 的便捷包装函数，使用默认配置。
///
/// # 参数
/// * `epub_path` - 源EPUB文件路径
/// * `output_dir` - 输出目录根路径
///
/// # 返回值
/// * `Result<()>` - 转换结果
pub fn convert_epub<P, Q>(epub_path: P, output_dir: Q) -> Result<()>
where
    P: AsRef<std::path::Path>,
    Q: AsRef<std::path::Path>,
{
    Converter::with_config(ConvertConfig::default_config()).run(epub_path, output_dir)
}
