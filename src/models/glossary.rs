//! 抓取结果的数据结构
//!
//! JSON 形状：
//!
//! ```text
//! {
//!   "main": "页面正文",
//!   "A": { "page_0": { "header": "...", "text": "...", "images": ["..."] } },
//!   "B": { "page_0": { ... }, "page_1": { ... } }
//! }
//! ```

use std::fmt;
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, ScrapeError};

/// 页面正文在结果中的键名
pub const MAIN_KEY: &str = "main";

const PAGE_PREFIX: &str = "page_";

/// 单个词条
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub header: String,
    /// 没有正文块时整个键都不输出
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// 一个字母下的全部词条，按按钮在 DOM 中的顺序排列
///
/// 序列化为 `page_0`、`page_1`……，键名由位置决定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterGroup {
    entries: Vec<GlossaryEntry>,
}

impl LetterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: GlossaryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&GlossaryEntry> {
        parse_page_key(key).and_then(|i| self.entries.get(i))
    }

    /// 按顺序生成 (键名, 词条)
    pub fn pages(&self) -> impl Iterator<Item = (String, &GlossaryEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (page_key(i), entry))
    }
}

impl FromIterator<GlossaryEntry> for LetterGroup {
    fn from_iter<I: IntoIterator<Item = GlossaryEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

pub fn page_key(index: usize) -> String {
    format!("{}{}", PAGE_PREFIX, index)
}

fn parse_page_key(key: &str) -> Option<usize> {
    let digits = key.strip_prefix(PAGE_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // 拒绝 page_01 这类非规范写法
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

impl Serialize for LetterGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in self.pages() {
            map.serialize_entry(&key, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LetterGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct GroupVisitor;

        impl<'de> Visitor<'de> for GroupVisitor {
            type Value = LetterGroup;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of page_<n> keys to entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<LetterGroup, A::Error> {
                let mut indexed: Vec<(usize, GlossaryEntry)> = Vec::new();
                while let Some(key) = access.next_key::<String>()? {
                    let index = parse_page_key(&key)
                        .ok_or_else(|| de::Error::custom(format!("invalid page key: {}", key)))?;
                    let entry = access.next_value::<GlossaryEntry>()?;
                    indexed.push((index, entry));
                }
                indexed.sort_by_key(|(i, _)| *i);
                for (expected, (index, _)) in indexed.iter().enumerate() {
                    if *index != expected {
                        return Err(de::Error::custom(format!(
                            "page keys are not contiguous: expected {}, found {}",
                            page_key(expected),
                            page_key(*index)
                        )));
                    }
                }
                Ok(indexed.into_iter().map(|(_, entry)| entry).collect())
            }
        }

        deserializer.deserialize_map(GroupVisitor)
    }
}

/// 结果中的一节：页面正文或一个字母
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Section {
    Main(String),
    Letter(LetterGroup),
}

/// 完整抓取结果，保持插入顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    sections: Vec<(String, Section)>,
}

impl Glossary {
    /// 插入一节；同名的节原位替换
    fn insert(&mut self, label: String, section: Section) {
        match self.sections.iter_mut().find(|(k, _)| *k == label) {
            Some(slot) => slot.1 = section,
            None => self.sections.push((label, section)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(k, _)| k == label)
            .map(|(_, section)| section)
    }

    pub fn main(&self) -> Option<&str> {
        match self.get(MAIN_KEY) {
            Some(Section::Main(text)) => Some(text),
            _ => None,
        }
    }

    pub fn letter(&self, label: &str) -> Option<&LetterGroup> {
        match self.get(label) {
            Some(Section::Letter(group)) => Some(group),
            _ => None,
        }
    }

    /// 全部字母，按出现顺序
    pub fn letters(&self) -> impl Iterator<Item = (&str, &LetterGroup)> {
        self.sections.iter().filter_map(|(label, section)| match section {
            Section::Letter(group) => Some((label.as_str(), group)),
            Section::Main(_) => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(label, _)| label.as_str())
    }

    /// 单空格缩进、保留非 ASCII 字符的 JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json 只输出合法 UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 写入 JSON 文件（覆盖）
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ScrapeError::io(parent, e))?;
        }
        tokio::fs::write(path, json)
            .await
            .map_err(|e| ScrapeError::io(path, e))
    }
}

impl Serialize for Glossary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (label, section) in &self.sections {
            map.serialize_entry(label, section)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Glossary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct GlossaryVisitor;

        impl<'de> Visitor<'de> for GlossaryVisitor {
            type Value = Glossary;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of section labels to text or letter groups")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Glossary, A::Error> {
                let mut glossary = Glossary::default();
                while let Some((label, section)) = access.next_entry::<String, Section>()? {
                    glossary.insert(label, section);
                }
                Ok(glossary)
            }
        }

        deserializer.deserialize_map(GlossaryVisitor)
    }
}

/// 抓取过程中逐步构建结果
#[derive(Debug, Default)]
pub struct GlossaryBuilder {
    glossary: Glossary,
}

impl GlossaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录页面正文
    pub fn main_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.glossary
            .insert(MAIN_KEY.to_string(), Section::Main(text.into()));
        self
    }

    /// 记录一个字母的全部词条
    pub fn letter(&mut self, label: impl Into<String>, group: LetterGroup) -> &mut Self {
        self.glossary.insert(label.into(), Section::Letter(group));
        self
    }

    pub fn build(self) -> Glossary {
        self.glossary
    }
}
