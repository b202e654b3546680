//! NCX解析器模块
//!
//! 提供NCX（Navigation Control file for XML）文件的XML解析功能。
//! 解析本身只负责把XML还原成导航树，必需元素的检查由目录
//! 构建阶段完成。

use crate::epub::error::{EpubError, Result};
use crate::epub::ncx::navigation::{DocTitle, NavContent, NavLabel, NavMap, NavPoint};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// NCX文件解析结果
#[derive(Debug, Clone)]
pub struct Ncx {
    /// NCX版本
    pub version: String,
    /// 文档标题，docTitle元素缺失时为None
    pub doc_title: Option<DocTitle>,
    /// 导航地图，navMap元素缺失时为None
    pub nav_map: Option<NavMap>,
}

impl Ncx {
    /// 解析NCX文件内容
    ///
    /// # 参数
    /// * `xml_content` - NCX文件的XML内容
    ///
    /// # 返回值
    /// * `Result<Ncx, EpubError>` - 解析后的NCX信息
    pub fn parse_xml(xml_content: &str) -> Result<Ncx> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut saw_ncx = false;
        let mut version = String::new();
        let mut doc_title = None;
        let mut nav_map = None;

        let mut buf = Vec::new();
        let mut current_section = String::new();
        let mut text_content = String::new();

        // 导航点解析状态：未闭合的祖先导航点入栈
        let mut nav_point_stack: Vec<NavPoint> = Vec::new();
        let mut current_nav_point: Option<NavPoint> = None;
        let mut current_nav_label: Option<NavLabel> = None;
        let mut current_nav_content: Option<NavContent> = None;
        let mut current_nav_map = NavMap::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let local_name_bytes = e.local_name();
                    let local_name = String::from_utf8_lossy(local_name_bytes.as_ref());

                    match local_name.as_ref() {
                        "ncx" => {
                            saw_ncx = true;
                            version = Self::parse_ncx_version(e)?;
                        }
                        "docTitle" => {
                            current_section = "docTitle".to_string();
                            text_content.clear();
                        }
                        "navMap" => {
                            current_section = "navMap".to_string();
                            current_nav_map = NavMap::new();
                        }
                        "navPoint" if current_section == "navMap" => {
                            // 当前导航点尚未闭合，说明进入了它的子导航点
                            if let Some(nav_point) = current_nav_point.take() {
                                nav_point_stack.push(nav_point);
                            }
                            current_nav_point = Some(NavPoint::new(Self::parse_nav_point_id(e)?));
                        }
                        "navLabel" if current_section == "navMap" => {
                            current_nav_label = Some(NavLabel::new(None));
                            text_content.clear();
                        }
                        "content" if current_section == "navMap" => {
                            current_nav_content =
                                Some(NavContent::new(Self::parse_content_src(e)?));
                        }
                        _ => {}
                    }
                }
                Event::Empty(ref e) => {
                    let local_name_bytes = e.local_name();
                    let local_name = String::from_utf8_lossy(local_name_bytes.as_ref());

                    if local_name.as_ref() == "content" && current_section == "navMap" {
                        current_nav_content = Some(NavContent::new(Self::parse_content_src(e)?));
                    }
                }
                Event::End(ref e) => {
                    let local_name_bytes = e.local_name();
                    let local_name = String::from_utf8_lossy(local_name_bytes.as_ref());

                    match local_name.as_ref() {
                        "docTitle" => {
                            doc_title = Some(DocTitle::new(text_content.trim().to_string()));
                            current_section.clear();
                        }
                        "navMap" => {
                            nav_map = Some(current_nav_map.clone());
                            current_section.clear();
                        }
                        "text" if current_section == "navMap" => {
                            if let Some(ref mut nav_label) = current_nav_label {
                                nav_label.text = Some(text_content.trim().to_string());
                            }
                            text_content.clear();
                        }
                        "navLabel" if current_section == "navMap" => {
                            if let (Some(nav_label), Some(ref mut nav_point)) =
                                (current_nav_label.take(), current_nav_point.as_mut())
                            {
                                nav_point.nav_label = Some(nav_label);
                            }
                        }
                        "content" if current_section == "navMap" => {
                            if let (Some(nav_content), Some(ref mut nav_point)) =
                                (current_nav_content.take(), current_nav_point.as_mut())
                            {
                                nav_point.content = Some(nav_content);
                            }
                        }
                        "navPoint" if current_section == "navMap" => {
                            if let Some(nav_point) = current_nav_point.take() {
                                if let Some(mut parent) = nav_point_stack.pop() {
                                    parent.add_child(nav_point);
                                    current_nav_point = Some(parent);
                                } else {
                                    current_nav_map.add_nav_point(nav_point);
                                }
                            }
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

        if !saw_ncx {
            return Err(EpubError::MissingElement("ncx".to_string()));
        }

        Ok(Ncx {
            version,
            doc_title,
            nav_map,
        })
    }

    /// 解析ncx根元素的version属性
    fn parse_ncx_version(e: &quick_xml::events::BytesStart) -> Result<String> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            if attr.key.local_name().as_ref() == b"version" {
                return Ok(String::from_utf8_lossy(&attr.value).to_string());
            }
        }
        Ok(String::new())
    }

    /// 解析navPoint元素的id属性
    fn parse_nav_point_id(e: &quick_xml::events::BytesStart) -> Result<String> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            if attr.key.local_name().as_ref() == b"id" {
                return Ok(String::from_utf8_lossy(&attr.value).to_string());
            }
        }
        Ok(String::new())
    }

    /// 解析content元素的src属性，缺失时返回None
    fn parse_content_src(e: &quick_xml::events::BytesStart) -> Result<Option<String>> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            if attr.key.local_name().as_ref() == b"src" {
                return Ok(Some(String::from_utf8_lossy(&attr.value).to_string()));
            }
        }
        Ok(None)
    }
}
