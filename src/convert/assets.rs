//! 资源复制模块
//!
//! 把清单中所有图片类和文本类条目原样复制到输出目录，
//! 保持其相对路径不变。

use crate::epub::error::{EpubError, Result};
use crate::epub::opf::Opf;
use crate::epub::reader::Epub;

use super::output::OutputWriter;

/// 复制清单中的资源文件
///
/// 媒体类型以`image/`或`text/`开头的条目逐个从压缩包复制到
/// 输出目录的相同相对路径；各次复制相互独立，遍历顺序不影响
/// 结果。引用的条目在压缩包中不存在时返回引用错误。
///
/// # 返回值
/// * `Result<usize>` - 复制的资源数量
pub fn copy_assets(
    epub: &mut Epub,
    opf: &Opf,
    package_root: &str,
    writer: &OutputWriter,
) -> Result<usize> {
    let mut copied = 0;

    for item in opf.manifest.values() {
        if !item.is_asset() {
            continue;
        }

        let entry_path = format!("{}/{}", package_root, item.href);
        if !epub.has_entry(&entry_path) {
            return Err(EpubError::MissingEntry(item.href.clone()));
        }
        let bytes = epub.read_bytes(&entry_path)?;
        writer.write_bytes(&item.href, &bytes)?;
        copied += 1;
    }

    Ok(copied)
}
