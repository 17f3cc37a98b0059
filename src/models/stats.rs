/// 抓取统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionStats {
    pub letters: usize,
    pub entries: usize,
    pub entries_without_text: usize,
    pub images_found: usize,
    pub images_saved: usize,
    pub images_skipped: usize,
}
