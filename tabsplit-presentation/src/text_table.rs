use std::{borrow::Cow, fmt::Write};

const COLUMN_GAP: &str = "  ";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Monospaced table with a dashed rule under the header row.
#[derive(Default)]
pub struct TextTableBuilder<'a> {
    headers: Vec<Cow<'a, str>>,
    rows: Vec<Vec<Cow<'a, str>>>,
    alignments: Vec<Alignment>,
}

impl<'a> TextTableBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &[Alignment]) -> Self {
        self.alignments = alignments.to_vec();
        self
    }

    pub fn headers(mut self, headers: impl IntoIterator<Item = Cow<'a, str>>) -> Self {
        self.headers = headers.into_iter().collect();
        self
    }

    pub fn row(mut self, row: impl IntoIterator<Item = Cow<'a, str>>) -> Self {
        self.rows.push(row.into_iter().collect());
        self
    }

    pub fn build(&self) -> String {
        let column_count = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let mut widths = vec![0usize; column_count];
        for line in std::iter::once(&self.headers).chain(&self.rows) {
            for (idx, cell) in line.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        if !self.headers.is_empty() {
            self.write_line(&mut out, &self.headers, &widths);
            let rule: Vec<Cow<'_, str>> = widths
                .iter()
                .map(|width| Cow::Owned("-".repeat(*width)))
                .collect();
            self.write_line(&mut out, &rule, &widths);
        }
        for row in &self.rows {
            self.write_line(&mut out, row, &widths);
        }
        out
    }

    fn write_line(&self, out: &mut String, cells: &[Cow<'_, str>], widths: &[usize]) {
        let mut line = String::new();
        for (idx, width) in widths.iter().enumerate() {
            if idx > 0 {
                line.push_str(COLUMN_GAP);
            }
            let cell = cells.get(idx).map_or("", |cell| cell.as_ref());
            let pad = width.saturating_sub(cell.chars().count());
            match self.alignments.get(idx).copied().unwrap_or_default() {
                Alignment::Left => {
                    line.push_str(cell);
                    line.extend(std::iter::repeat_n(' ', pad));
                }
                Alignment::Right => {
                    line.extend(std::iter::repeat_n(' ', pad));
                    line.push_str(cell);
                }
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}
