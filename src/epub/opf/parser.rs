//! OPF解析器模块
//!
//! 提供OPF（Open Packaging Format）文件的XML解析功能。
//! 解析采用严格模式：package、metadata、manifest、spine四个
//! 必需部分缺一即错，清单项属性不全或ID重复也视为致命错误。

use crate::epub::error::{EpubError, Result};
use crate::epub::opf::{manifest::ManifestItem, metadata::Metadata, spine::SpineItem};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::collections::HashMap;

/// OPF文件解析结果
#[derive(Debug, Clone)]
pub struct Opf {
    /// EPUB版本
    pub version: String,
    /// 元数据
    pub metadata: Metadata,
    /// 清单项(id到文件的映射)
    pub manifest: HashMap<String, ManifestItem>,
    /// 脊柱(阅读顺序)
    pub spine: Vec<SpineItem>,
    /// 脊柱的目录引用(toc属性)
    pub spine_toc: Option<String>,
}

impl Opf {
    /// 解析OPF文件内容
    ///
    /// # 参数
    /// * `xml_content` - OPF文件的XML内容
    ///
    /// # 返回值
    /// * `Result<Opf, EpubError>` - 解析后的OPF信息
    pub fn parse_xml(xml_content: &str) -> Result<Opf> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut version = String::new();
        let mut metadata = Metadata::new();
        let mut manifest = HashMap::new();
        let mut spine = Vec::new();
        let mut spine_toc = None;

        let mut saw_package = false;
        let mut saw_metadata = false;
        let mut saw_manifest = false;
        let mut saw_spine = false;

        let mut buf = Vec::new();
        let mut current_section = String::new();
        let mut text_content = String::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let local_name_bytes = e.local_name();
                    let local_name = String::from_utf8_lossy(local_name_bytes.as_ref());

                    match local_name.as_ref() {
                        "package" => {
                            saw_package = true;
                            version = Self::parse_package_version(e)?;
                        }
                        "metadata" => {
                            saw_metadata = true;
                            current_section = "metadata".to_string();
                        }
                        "manifest" => {
                            saw_manifest = true;
                            current_section = "manifest".to_string();
                        }
                        "spine" => {
                            saw_spine = true;
                            current_section = "spine".to_string();
                            spine_toc = Self::parse_spine_toc(e)?;
                        }
                        "item" if current_section == "manifest" => {
                            Self::parse_manifest_item(e, &mut manifest)?;
                        }
                        "itemref" if current_section == "spine" => {
                            Self::parse_spine_item(e, &mut spine)?;
                        }
                        _ if current_section == "metadata" => {
                            text_content.clear();
                        }
                        _ => {}
                    }
                }
                Event::Empty(ref e) => {
                    let local_name_bytes = e.local_name();
                    let local_name = String::from_utf8_lossy(local_name_bytes.as_ref());

                    match local_name.as_ref() {
                        "item" if current_section == "manifest" => {
                            Self::parse_manifest_item(e, &mut manifest)?;
                        }
                        "itemref" if current_section == "spine" => {
                            Self::parse_spine_item(e, &mut spine)?;
                        }
                        _ => {}
                    }
                }
                Event::End(ref e) => {
                    let local_name_bytes = e.local_name();
                    let local_name = String::from_utf8_lossy(local_name_bytes.as_ref());

                    match local_name.as_ref() {
                        "metadata" | "manifest" | "spine" => {
                            current_section.clear();
                        }
                        "meta" => {}
                        _ if current_section == "metadata" => {
                            // quick_xml的local_name()会忽略命名空间前缀，
                            // <dc:title>在这里是"title"
                            let content = text_content.trim();
                            if !content.is_empty() {
                                metadata
                                    .add_dublin_core(local_name.to_string(), content.to_string());
                            }
                            text_content.clear();
                        }
                        _ => {}
                    }
                }
                Event::Text(e) => {
                    text_content.push_str(&e.unescape()?);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !saw_package {
            return Err(EpubError::MissingElement("package".to_string()));
        }
        if !saw_metadata {
            return Err(EpubError::MissingElement("package.metadata".to_string()));
        }
        if !saw_manifest {
            return Err(EpubError::MissingElement("package.manifest".to_string()));
        }
        if !saw_spine {
            return Err(EpubError::MissingElement("package.spine".to_string()));
        }

        Ok(Opf {
            version,
            metadata,
            manifest,
            spine,
            spine_toc,
        })
    }

    /// 解析package元素的version属性
    fn parse_package_version(e: &quick_xml::events::BytesStart) -> Result<String> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            if attr.key.local_name().as_ref() == b"version" {
                return Ok(String::from_utf8_lossy(&attr.value).to_string());
            }
        }
        Ok(String::new())
    }

    /// 解析spine元素的toc属性
    fn parse_spine_toc(e: &quick_xml::events::BytesStart) -> Result<Option<String>> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            if attr.key.local_name().as_ref() == b"toc" {
                return Ok(Some(String::from_utf8_lossy(&attr.value).to_string()));
            }
        }
        Ok(None)
    }

    /// 解析清单项
    ///
    /// id、href、media-type三个属性均为必需，缺失即错；
    /// ID重复视为数据完整性错误。
    fn parse_manifest_item(
        e: &quick_xml::events::BytesStart,
        manifest: &mut HashMap<String, ManifestItem>,
    ) -> Result<()> {
        let mut id = None;
        let mut href = None;
        let mut media_type = None;

        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            match attr.key.local_name().as_ref() {
                b"id" => {
                    id = Some(String::from_utf8_lossy(&attr.value).to_string());
                }
                b"href" => {
                    href = Some(String::from_utf8_lossy(&attr.value).to_string());
                }
                b"media-type" => {
                    media_type = Some(String::from_utf8_lossy(&attr.value).to_string());
                }
                _ => {}
            }
        }

        let missing_attr = |attribute: &str| EpubError::MissingAttribute {
            element: "package.manifest.item".to_string(),
            attribute: attribute.to_string(),
        };
        let id = id.ok_or_else(|| missing_attr("id"))?;
        let href = href.ok_or_else(|| missing_attr("href"))?;
        let media_type = media_type.ok_or_else(|| missing_attr("media-type"))?;

        if manifest.contains_key(&id) {
            return Err(EpubError::DuplicateManifestId(id));
        }
        manifest.insert(id.clone(), ManifestItem::new(id, href, media_type));

        Ok(())
    }

    /// 解析脊柱项
    ///
    /// idref属性为必需；linear属性缺失时默认为true，仅"no"为false。
    fn parse_spine_item(
        e: &quick_xml::events::BytesStart,
        spine: &mut Vec<SpineItem>,
    ) -> Result<()> {
        let mut idref = None;
        let mut linear = true;

        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            match attr.key.local_name().as_ref() {
                b"idref" => {
                    idref = Some(String::from_utf8_lossy(&attr.value).to_string());
                }
                b"linear" => {
                    let linear_value = String::from_utf8_lossy(&attr.value);
                    linear = linear_value != "no";
                }
                _ => {}
            }
        }

        let idref = idref.ok_or_else(|| EpubError::MissingAttribute {
            element: "package.spine.itemref".to_string(),
            attribute: "idref".to_string(),
        })?;
        spine.push(SpineItem::with_linear(idref, linear));

        Ok(())
    }
}
