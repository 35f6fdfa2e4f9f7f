//! Report layout: turn a [`CandidateRecord`] into styled lines, then pages.
//!
//! Layout is kept separate from the writers so the content rules (which
//! blocks appear, where `N/A` is substituted, what is bold) are decided once
//! and tested without a PDF engine. Writers only place the lines they are
//! given.

use crate::record::{or_na, CandidateRecord, NOT_AVAILABLE};
use crate::report::metrics::text_width;
use crate::report::ReportLabels;

/// Visual role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Centered document title.
    Title,
    /// Section heading.
    Heading,
    /// Regular text.
    Body,
}

impl LineStyle {
    pub fn font_size(self) -> f32 {
        match self {
            LineStyle::Title => 18.0,
            LineStyle::Heading => 12.0,
            LineStyle::Body => 11.0,
        }
    }

    /// Extra vertical gap above lines of this style.
    fn space_before(self) -> f32 {
        match self {
            LineStyle::Title => 0.0,
            LineStyle::Heading => 10.0,
            LineStyle::Body => 0.0,
        }
    }
}

/// Block of the report a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Contact,
    Education,
    WorkExperience,
    Skills,
}

/// A run of text with uniform weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub section: Section,
    pub style: LineStyle,
    /// Nesting depth; 0 is flush left.
    pub indent: u8,
    pub spans: Vec<Span>,
}

impl ReportLine {
    fn new(section: Section, style: LineStyle, indent: u8, spans: Vec<Span>) -> Self {
        Self {
            section,
            style,
            indent,
            spans,
        }
    }

    /// The line's text with styling dropped.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Vertical space the line occupies, in points.
    pub fn height(&self) -> f32 {
        self.style.font_size() * LEADING + self.style.space_before()
    }

    /// Distance from the top of the line's box down to its text baseline.
    pub fn baseline_offset(&self) -> f32 {
        self.style.space_before() + self.style.font_size()
    }
}

/// Line height as a multiple of the font size.
const LEADING: f32 = 1.45;

/// Horizontal offset per indent level, in points.
pub const INDENT_PT: f32 = 18.0;

/// Build the report lines for `record`.
///
/// Block order: title, candidate name, contact, education, work experience,
/// skills. Any absent value renders as [`NOT_AVAILABLE`]; an empty or absent
/// list renders a single `N/A` line in its block.
pub fn layout(record: &CandidateRecord, labels: &ReportLabels) -> Vec<ReportLine> {
    use LineStyle::*;
    use Section::*;

    let mut lines = vec![
        ReportLine::new(Header, Title, 0, vec![Span::plain(&labels.title)]),
        ReportLine::new(
            Header,
            Body,
            0,
            vec![
                Span::bold(format!("{}: ", labels.candidate_name)),
                Span::plain(or_na(&record.candidate_name)),
            ],
        ),
    ];

    lines.push(ReportLine::new(Contact, Heading, 0, vec![Span::bold(&labels.contact)]));
    lines.push(ReportLine::new(
        Contact,
        Body,
        1,
        vec![Span::plain(format!("{}: {}", labels.email, record.email()))],
    ));
    lines.push(ReportLine::new(
        Contact,
        Body,
        1,
        vec![Span::plain(format!("{}: {}", labels.phone, record.phone()))],
    ));

    lines.push(ReportLine::new(Education, Heading, 0, vec![Span::bold(&labels.education)]));
    for edu in record.education_entries() {
        lines.push(ReportLine::new(
            Education,
            Body,
            1,
            vec![Span::bold(or_na(&edu.degree))],
        ));
        lines.push(ReportLine::new(
            Education,
            Body,
            2,
            vec![Span::plain(format!(
                "{}: {}",
                labels.institution,
                or_na(&edu.institution)
            ))],
        ));
        lines.push(ReportLine::new(
            Education,
            Body,
            2,
            vec![Span::plain(format!("{}: {}", labels.dates, or_na(&edu.dates)))],
        ));
    }
    if record.education_entries().is_empty() {
        lines.push(not_available(Education));
    }

    lines.push(ReportLine::new(
        WorkExperience,
        Heading,
        0,
        vec![Span::bold(&labels.work_experience)],
    ));
    for work in record.work_entries() {
        lines.push(ReportLine::new(
            WorkExperience,
            Body,
            1,
            vec![
                Span::bold(or_na(&work.role)),
                Span::plain(format!(" {} ", labels.at)),
                Span::bold(or_na(&work.company)),
            ],
        ));
        lines.push(ReportLine::new(
            WorkExperience,
            Body,
            2,
            vec![Span::plain(format!("{}: {}", labels.dates, or_na(&work.dates)))],
        ));
    }
    if record.work_entries().is_empty() {
        lines.push(not_available(WorkExperience));
    }

    lines.push(ReportLine::new(Skills, Heading, 0, vec![Span::bold(&labels.skills)]));
    let skills = record.skill_list();
    if skills.is_empty() {
        lines.push(not_available(Skills));
    } else {
        lines.push(ReportLine::new(Skills, Body, 1, vec![Span::plain(skills.join(", "))]));
    }

    lines
}

fn not_available(section: Section) -> ReportLine {
    ReportLine::new(section, LineStyle::Body, 1, vec![Span::plain(NOT_AVAILABLE)])
}

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// US Letter with one-inch margins.
    pub const LETTER: PageGeometry = PageGeometry {
        width: 612.0,
        height: 792.0,
        margin: 72.0,
    };

    pub fn usable_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// Room left for text on a line indented `indent` levels.
    pub fn text_width_at(&self, indent: u8) -> f32 {
        self.width - 2.0 * self.margin - f32::from(indent) * INDENT_PT
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Break every line wider than the page into continuation lines.
///
/// Breaks fall between words; a single word wider than the line is split
/// between characters. Continuation lines keep the section, style and indent
/// of the line they came from, and bold runs stay bold.
pub fn wrap(lines: &[ReportLine], geometry: &PageGeometry) -> Vec<ReportLine> {
    lines
        .iter()
        .flat_map(|line| wrap_line(line, geometry.text_width_at(line.indent)))
        .collect()
}

/// A word as styled fragments. Fragments come from adjacent spans with no
/// whitespace between them.
type Word = Vec<Span>;

fn wrap_line(line: &ReportLine, max_width: f32) -> Vec<ReportLine> {
    let size = line.style.font_size();
    let all_bold = line.style != LineStyle::Body;
    let measure = |word: &Word| -> f32 {
        word.iter()
            .map(|s| text_width(&s.text, size, s.bold || all_bold))
            .sum()
    };
    let space = text_width(" ", size, all_bold);

    let mut rows: Vec<Vec<Word>> = Vec::new();
    let mut row: Vec<Word> = Vec::new();
    let mut used = 0.0_f32;

    for word in split_words(&line.spans) {
        let pieces = if measure(&word) > max_width {
            split_chars(word, max_width, size, all_bold)
        } else {
            vec![word]
        };
        for piece in pieces {
            let w = measure(&piece);
            if !row.is_empty() && used + space + w > max_width {
                rows.push(std::mem::take(&mut row));
                used = 0.0;
            }
            if !row.is_empty() {
                used += space;
            }
            used += w;
            row.push(piece);
        }
    }

    if rows.is_empty() {
        return vec![line.clone()];
    }
    rows.push(row);
    rows.into_iter()
        .map(|words| ReportLine::new(line.section, line.style, line.indent, join_words(words)))
        .collect()
}

fn split_words(spans: &[Span]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    // Whether the next fragment continues the last word.
    let mut open = false;

    for span in spans {
        for (i, part) in span.text.split(char::is_whitespace).enumerate() {
            if i > 0 {
                open = false;
            }
            if part.is_empty() {
                continue;
            }
            let fragment = Span {
                text: part.to_string(),
                bold: span.bold,
            };
            match words.last_mut() {
                Some(word) if open => word.push(fragment),
                _ => words.push(vec![fragment]),
            }
            open = true;
        }
    }
    words
}

/// Cut an over-long word into pieces that each fit `max_width`.
fn split_chars(word: Word, max_width: f32, size: f32, all_bold: bool) -> Vec<Word> {
    let mut pieces: Vec<Word> = Vec::new();
    let mut current: Word = Vec::new();
    let mut used = 0.0_f32;

    for fragment in word {
        let bold = fragment.bold || all_bold;
        for ch in fragment.text.chars() {
            let w = text_width(ch.encode_utf8(&mut [0u8; 4]), size, bold);
            if !current.is_empty() && used + w > max_width {
                pieces.push(std::mem::take(&mut current));
                used = 0.0;
            }
            used += w;
            match current.last_mut() {
                Some(last) if last.bold == fragment.bold => last.text.push(ch),
                _ => current.push(Span {
                    text: ch.to_string(),
                    bold: fragment.bold,
                }),
            }
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Rebuild spans for one output row, merging neighbours of equal weight.
fn join_words(words: Vec<Word>) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for (i, word) in words.into_iter().enumerate() {
        for (j, fragment) in word.into_iter().enumerate() {
            let text = if i > 0 && j == 0 {
                format!(" {}", fragment.text)
            } else {
                fragment.text
            };
            match spans.last_mut() {
                Some(last) if last.bold == fragment.bold => last.text.push_str(&text),
                _ => spans.push(Span {
                    text,
                    bold: fragment.bold,
                }),
            }
        }
    }
    spans
}

/// Split `lines` into pages that fit `geometry`.
///
/// Lines are never split. A line taller than the usable height still gets a
/// page of its own rather than being dropped.
pub fn paginate<'a>(lines: &'a [ReportLine], geometry: &PageGeometry) -> Vec<Vec<&'a ReportLine>> {
    let usable = geometry.usable_height();
    let mut pages: Vec<Vec<&ReportLine>> = Vec::new();
    let mut current: Vec<&ReportLine> = Vec::new();
    let mut used = 0.0_f32;

    for line in lines {
        let h = line.height();
        if !current.is_empty() && used + h > usable {
            pages.push(std::mem::take(&mut current));
            used = 0.0;
        }
        current.push(line);
        used += h;
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ContactDetails, EducationEntry, WorkEntry};

    fn section_texts(lines: &[ReportLine], section: Section) -> Vec<String> {
        lines
            .iter()
            .filter(|l| l.section == section && l.style == LineStyle::Body)
            .map(ReportLine::text)
            .collect()
    }

    fn sample() -> CandidateRecord {
        CandidateRecord {
            candidate_name: Some("Jane Doe".into()),
            contact_details: Some(ContactDetails {
                email: Some("jane@example.com".into()),
                phone: None,
            }),
            education: Some(vec![EducationEntry {
                degree: Some("BSc Computer Science".into()),
                institution: Some("HUST".into()),
                dates: None,
            }]),
            skills: Some(vec!["Rust".into(), "SQL".into()]),
            work_experience: Some(vec![WorkEntry {
                company: Some("Acme".into()),
                role: Some("Engineer".into()),
                dates: Some("2019 - 2024".into()),
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn empty_education_renders_single_na_line() {
        let record = CandidateRecord {
            education: Some(vec![]),
            ..sample()
        };
        let lines = layout(&record, &ReportLabels::default());
        assert_eq!(section_texts(&lines, Section::Education), vec!["N/A"]);
    }

    #[test]
    fn missing_phone_renders_na() {
        let lines = layout(&sample(), &ReportLabels::default());
        let contact = section_texts(&lines, Section::Contact);
        assert_eq!(contact, vec!["Email: jane@example.com", "Phone: N/A"]);
    }

    #[test]
    fn education_entry_has_bold_degree_and_indented_sublines() {
        let lines = layout(&sample(), &ReportLabels::default());
        let edu: Vec<&ReportLine> = lines
            .iter()
            .filter(|l| l.section == Section::Education && l.style == LineStyle::Body)
            .collect();
        assert_eq!(edu.len(), 3);
        assert!(edu[0].spans[0].bold);
        assert_eq!(edu[0].text(), "BSc Computer Science");
        assert_eq!(edu[1].indent, 2);
        assert_eq!(edu[1].text(), "Institution: HUST");
        assert_eq!(edu[2].text(), "Dates: N/A");
    }

    #[test]
    fn work_entry_bolds_role_and_company() {
        let lines = layout(&sample(), &ReportLabels::default());
        let work: Vec<&ReportLine> = lines
            .iter()
            .filter(|l| l.section == Section::WorkExperience && l.style == LineStyle::Body)
            .collect();
        assert_eq!(work[0].text(), "Engineer at Acme");
        let bold: Vec<&str> = work[0]
            .spans
            .iter()
            .filter(|s| s.bold)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(bold, ["Engineer", "Acme"]);
        assert_eq!(work[1].text(), "Dates: 2019 - 2024");
    }

    #[test]
    fn skills_are_comma_joined_on_one_line() {
        let lines = layout(&sample(), &ReportLabels::default());
        assert_eq!(section_texts(&lines, Section::Skills), vec!["Rust, SQL"]);
    }

    #[test]
    fn empty_record_is_all_na() {
        let lines = layout(&CandidateRecord::default(), &ReportLabels::default());
        assert_eq!(lines[0].style, LineStyle::Title);
        assert_eq!(lines[1].text(), "Candidate name: N/A");
        assert_eq!(section_texts(&lines, Section::Education), vec!["N/A"]);
        assert_eq!(section_texts(&lines, Section::WorkExperience), vec!["N/A"]);
        assert_eq!(section_texts(&lines, Section::Skills), vec!["N/A"]);
    }

    #[test]
    fn short_report_fits_one_page() {
        let lines = layout(&sample(), &ReportLabels::default());
        let pages = paginate(&lines, &PageGeometry::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), lines.len());
    }

    #[test]
    fn long_report_breaks_pages_without_losing_lines() {
        let record = CandidateRecord {
            work_experience: Some(
                (0..60)
                    .map(|i| WorkEntry {
                        company: Some(format!("Company {i}")),
                        role: Some("Engineer".into()),
                        dates: Some("2020".into()),
                    })
                    .collect(),
            ),
            ..sample()
        };
        let geometry = PageGeometry::default();
        let lines = layout(&record, &ReportLabels::default());
        let pages = paginate(&lines, &geometry);
        assert!(pages.len() > 1);
        assert_eq!(pages.iter().map(Vec::len).sum::<usize>(), lines.len());
        for page in &pages {
            let used: f32 = page.iter().map(|l| l.height()).sum();
            assert!(used <= geometry.usable_height(), "page overflows: {used}");
        }
    }

    #[test]
    fn oversized_line_gets_its_own_page() {
        let tiny = PageGeometry {
            width: 100.0,
            height: 30.0,
            margin: 10.0,
        };
        let lines = layout(&CandidateRecord::default(), &ReportLabels::default());
        let pages = paginate(&lines, &tiny);
        assert_eq!(pages.len(), lines.len());
    }

    fn line_width(line: &ReportLine) -> f32 {
        line.spans
            .iter()
            .map(|s| {
                text_width(&s.text, line.style.font_size(), s.bold || line.style != LineStyle::Body)
            })
            .sum()
    }

    #[test]
    fn thirty_skills_wrap_within_the_margins() {
        let record = CandidateRecord {
            skills: Some((0..30).map(|i| format!("Distributed Systems {i}")).collect()),
            ..sample()
        };
        let geometry = PageGeometry::default();
        let wrapped = wrap(&layout(&record, &ReportLabels::default()), &geometry);
        let skills: Vec<&ReportLine> = wrapped
            .iter()
            .filter(|l| l.section == Section::Skills && l.style == LineStyle::Body)
            .collect();

        assert!(skills.len() > 3, "got {} lines", skills.len());
        for line in &skills {
            assert_eq!(line.indent, 1);
            let width = line_width(line);
            assert!(width <= geometry.text_width_at(1) + 0.01, "line too wide: {width}");
        }
        let rejoined: Vec<String> = skills.iter().map(|l| l.text()).collect();
        assert_eq!(rejoined.join(" "), record.skill_list().join(", "));
    }

    #[test]
    fn wrapping_keeps_bold_runs() {
        let record = CandidateRecord {
            work_experience: Some(vec![WorkEntry {
                company: Some("International Business Machines Corporation Research Division".into()),
                role: Some("Principal Staff Software Engineer for Platform Reliability".into()),
                dates: None,
            }]),
            ..sample()
        };
        let wrapped = wrap(&layout(&record, &ReportLabels::default()), &PageGeometry::default());
        let work: Vec<&ReportLine> = wrapped
            .iter()
            .filter(|l| l.section == Section::WorkExperience && l.indent == 1)
            .collect();

        assert!(work.len() > 1);
        let plain: String = work
            .iter()
            .flat_map(|l| l.spans.iter())
            .filter(|s| !s.bold)
            .map(|s| s.text.trim())
            .collect();
        assert_eq!(plain, "at");
        assert!(work[0].spans[0].bold);
    }

    #[test]
    fn unbreakable_word_is_split_between_characters() {
        let record = CandidateRecord {
            contact_details: Some(ContactDetails {
                email: Some(format!("{}@example.com", "x".repeat(200))),
                phone: None,
            }),
            ..sample()
        };
        let geometry = PageGeometry::default();
        let wrapped = wrap(&layout(&record, &ReportLabels::default()), &geometry);
        let email: Vec<&ReportLine> = wrapped
            .iter()
            .filter(|l| l.section == Section::Contact && l.style == LineStyle::Body)
            .take_while(|l| !l.text().starts_with("Phone"))
            .collect();

        assert!(email.len() > 1);
        for line in &email {
            assert!(line_width(line) <= geometry.text_width_at(1) + 0.01);
        }
    }

    #[test]
    fn short_lines_are_unchanged_by_wrap() {
        let lines = layout(&sample(), &ReportLabels::default());
        assert_eq!(wrap(&lines, &PageGeometry::default()), lines);
    }
}
