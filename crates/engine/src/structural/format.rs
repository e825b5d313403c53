/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Source formatter for the Go declarations produced by structural inference.
 *
 * Lines are re-indented with one tab per open brace and the cells of field
 * lines (name, type, then the tag as trailing text) are aligned the way an
 * elastic tabstop writer does it: a column is padded to the widest cell in
 * the run of consecutive lines that have a cell in that column. A field that
 * opens a nested block ends its alignment section.
 */

use thiserror::Error;

const PADDING: usize = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: unexpected '}}' with no open block")]
    UnexpectedClose { line: usize },

    #[error("{open} unclosed '{{' at end of input")]
    Unclosed { open: usize },

    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },

    #[error("line {line}: unterminated raw string literal")]
    UnterminatedRawString { line: usize },
}

#[derive(Debug)]
struct Line {
    tokens: Vec<String>,
    indent: usize,
    opens: bool,
}

impl Line {
    fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    // A field line lives inside a block and is not a close or a comment.
    fn is_field(&self) -> bool {
        self.indent > 0
            && self.tokens.len() >= 2
            && !self.tokens[0].starts_with('}')
            && !self.tokens[0].starts_with("//")
    }

    // Tagged fields have two cells (name, type) and the tag as trailing
    // text; anything else has the name as its only cell.
    fn cells(&self) -> (Vec<String>, String) {
        let n = self.tokens.len();
        let tagged = n >= 3 && !self.opens && self.tokens[n - 1].starts_with('`');
        if tagged {
            let ty = self.tokens[1..n - 1].join(" ");
            (vec![self.tokens[0].clone(), ty], self.tokens[n - 1].clone())
        } else {
            (vec![self.tokens[0].clone()], self.tokens[1..].join(" "))
        }
    }
}

/// Lays out Go source text. Formatting is idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoFormatter;

impl GoFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Re-indent and align `source`.
    ///
    /// # Errors
    ///
    /// Returns a `FormatError` for unbalanced braces and for string or raw
    /// string literals left open at the end of a line.
    pub fn format(&self, source: &str) -> Result<String, FormatError> {
        let lines = lex_lines(source)?;
        let mut out = String::with_capacity(source.len() + source.len() / 4);
        let mut section: Vec<&Line> = Vec::new();
        let mut pending_blank = false;

        for line in &lines {
            if line.is_blank() {
                flush(&mut section, &mut out);
                pending_blank = !out.is_empty();
                continue;
            }
            if pending_blank {
                out.push('\n');
                pending_blank = false;
            }

            if line.is_field() {
                let continues = section
                    .last()
                    .map_or(false, |prev| prev.indent == line.indent && !prev.opens);
                if !continues {
                    flush(&mut section, &mut out);
                }
                section.push(line);
                if line.opens {
                    flush(&mut section, &mut out);
                }
            } else {
                flush(&mut section, &mut out);
                push_indent(&mut out, line.indent);
                out.push_str(&line.tokens.join(" "));
                out.push('\n');
            }
        }
        flush(&mut section, &mut out);
        Ok(out)
    }
}

fn push_indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat('\t').take(depth));
}

fn flush(section: &mut Vec<&Line>, out: &mut String) {
    if section.is_empty() {
        return;
    }

    let rows: Vec<(Vec<String>, String)> = section.iter().map(|line| line.cells()).collect();
    let cells: Vec<Vec<String>> = rows.iter().map(|(cells, _)| cells.clone()).collect();
    let mut widths = vec![Vec::new(); cells.len()];
    column_widths(&cells, 0, &mut widths);

    for ((line, (cells, trailing)), widths) in section.iter().zip(&rows).zip(&widths) {
        push_indent(out, line.indent);
        for (cell, width) in cells.iter().zip(widths) {
            out.push_str(cell);
            let pad = width + PADDING - cell.chars().count();
            out.extend(std::iter::repeat(' ').take(pad));
        }
        out.push_str(trailing);
        out.push('\n');
    }
    section.clear();
}

// widths[row][col] for every cell; a column block is a maximal run of rows
// that all have a cell in that column.
fn column_widths(rows: &[Vec<String>], col: usize, widths: &mut [Vec<usize>]) {
    let mut start = 0;
    while start < rows.len() {
        if rows[start].len() <= col {
            start += 1;
            continue;
        }
        let mut end = start;
        while end < rows.len() && rows[end].len() > col {
            end += 1;
        }
        let width = rows[start..end]
            .iter()
            .map(|row| row[col].chars().count())
            .max()
            .unwrap_or(0);
        for row_widths in &mut widths[start..end] {
            row_widths.push(width);
        }
        column_widths(&rows[start..end], col + 1, &mut widths[start..end]);
        start = end;
    }
}

fn lex_lines(source: &str) -> Result<Vec<Line>, FormatError> {
    let mut depth = 0usize;
    let mut lines = Vec::new();

    for (index, text) in source.lines().enumerate() {
        let number = index + 1;
        let lexed = lex(text, number)?;
        let lowest = depth as isize + lexed.lowest;
        if lowest < 0 {
            return Err(FormatError::UnexpectedClose { line: number });
        }
        let indent = lowest as usize;
        depth = (depth as isize + lexed.delta) as usize;
        lines.push(Line {
            tokens: lexed.tokens,
            indent,
            opens: lexed.delta > 0,
        });
    }

    if depth > 0 {
        return Err(FormatError::Unclosed { open: depth });
    }
    // leading and trailing blank lines are dropped
    while lines.last().map_or(false, Line::is_blank) {
        lines.pop();
    }
    let first = lines.iter().position(|l| !l.is_blank()).unwrap_or(lines.len());
    lines.drain(..first);
    Ok(lines)
}

struct Lexed {
    tokens: Vec<String>,
    delta: isize,
    lowest: isize,
}

fn lex(text: &str, line: usize) -> Result<Lexed, FormatError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut delta = 0isize;
    let mut lowest = 0isize;
    let mut chars = text.trim().chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                current.push(c);
                let mut closed = false;
                while let Some(ch) = chars.next() {
                    current.push(ch);
                    if ch == '\\' {
                        match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => break,
                        }
                    } else if ch == c {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(FormatError::UnterminatedString { line });
                }
            }
            '`' => {
                current.push(c);
                let mut closed = false;
                for ch in chars.by_ref() {
                    current.push(ch);
                    if ch == '`' {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(FormatError::UnterminatedRawString { line });
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                let comment: String = std::iter::once(c).chain(chars.by_ref()).collect();
                tokens.push(comment.trim_end().to_string());
            }
            '{' => {
                delta += 1;
                current.push(c);
            }
            '}' => {
                delta -= 1;
                lowest = lowest.min(delta);
                current.push(c);
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(Lexed {
        tokens,
        delta,
        lowest,
    })
}
