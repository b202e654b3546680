//! 转换管线模块
//!
//! 按依赖顺序执行各转换阶段：打开压缩包 → 定位包根目录 →
//! 解析OPF → 写入metadata.json → 解析NCX写入toc.json →
//! 复制资源 → 合并HTML。任一必需元素检查失败立即中止，
//! 不做重试，也不回收已写入的产物。

pub mod assets;
pub mod config;
pub mod merge;
pub mod output;

pub use assets::copy_assets;
pub use config::ConvertConfig;
pub use merge::{MergedDocument, merge_spine};
pub use output::OutputWriter;

use crate::epub::error::{EpubError, Result, require};
use crate::epub::ncx::{Ncx, TableOfContents, contents_from_nav_points};
use crate::epub::opf::{BookMetadata, Opf};
use crate::epub::reader::{Epub, PACKAGE_OPF};
use std::path::Path;

/// EPUB转换器
///
/// 持有转换配置，`run`执行完整的转换管线。
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    /// 使用默认配置文件创建转换器(配置文件不存在时自动生成)
    pub fn new() -> Self {
        Self {
            config: ConvertConfig::new(),
        }
    }

    /// 使用指定配置创建转换器
    pub fn with_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// 执行完整的转换管线
    ///
    /// # 参数
    /// * `epub_path` - 源EPUB文件路径
    /// * `output_dir` - 输出目录根路径
    ///
    /// # 返回值
    /// * `Result<()>` - 全部阶段成功返回Ok，任一阶段失败返回错误
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, epub_path: P, output_dir: Q) -> Result<()> {
        let epub_path = epub_path.as_ref();

        println!("📦 正在打开 {}...", epub_path.display());
        let mut epub = Epub::from_path(epub_path)?;

        let package_root = epub.package_root(&self.config.package_roots)?;
        println!("📄 正在提取 {}/{}...", package_root, PACKAGE_OPF);
        let opf_content = epub.read_text(&format!("{}/{}", package_root, PACKAGE_OPF))?;

        println!("🔍 正在解析 {}...", PACKAGE_OPF);
        let opf = Opf::parse_xml(&opf_content)?;

        let writer = OutputWriter::new(output_dir);

        let book = BookMetadata::from_metadata(&opf.metadata)?;
        println!("💾 正在写入 metadata.json...");
        writer.write_json("metadata.json", &book)?;

        println!("🧭 正在提取目录...");
        let toc = self.resolve_toc(&mut epub, &opf, &package_root)?;
        println!("💾 正在写入 toc.json...");
        writer.write_json("toc.json", &toc)?;

        println!("🖼️  正在复制资源文件...");
        let copied = copy_assets(&mut epub, &opf, &package_root, &writer)?;
        println!("  已复制 {} 个资源文件", copied);

        println!("📖 正在解析并合并HTML...");
        let merged = merge_spine(&mut epub, &opf, &package_root, &self.config.content_dir)?;
        println!("💾 正在写入合并后的HTML...");
        let index_path = format!("{}/index.html", self.config.content_dir);
        writer.write_bytes(&index_path, merged.finalize().as_bytes())?;

        Ok(())
    }

    /// 定位、解析NCX并转换为目录输出结构
    ///
    /// 导航点转换失败不中止整个转换：按失败标记语义输出空目录，
    /// 诊断信息写到标准错误。docTitle和navMap缺失仍为致命错误。
    fn resolve_toc(
        &self,
        epub: &mut Epub,
        opf: &Opf,
        package_root: &str,
    ) -> Result<TableOfContents> {
        let toc_id = opf
            .spine_toc
            .clone()
            .ok_or_else(|| EpubError::MissingAttribute {
                element: "package.spine".to_string(),
                attribute: "toc".to_string(),
            })?;
        let ncx_item = opf
            .manifest
            .get(&toc_id)
            .ok_or_else(|| EpubError::MissingEntry(format!("目录文件(id={})", toc_id)))?;

        let ncx_path = format!("{}/{}", package_root, ncx_item.href);
        if !epub.has_entry(&ncx_path) {
            return Err(EpubError::MissingEntry(ncx_item.href.clone()));
        }
        let ncx_content = epub.read_text(&ncx_path)?;
        let ncx = Ncx::parse_xml(&ncx_content)?;

        let title = require(ncx.doc_title, "ncx.docTitle")?.text;
        let nav_map = require(ncx.nav_map, "ncx.navMap")?;

        let contents = match contents_from_nav_points(&nav_map.nav_points) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("❌ 目录转换失败: {}", e);
                Vec::new()
            }
        };

        Ok(TableOfContents { title, contents })
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
