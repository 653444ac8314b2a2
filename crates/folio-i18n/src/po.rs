//! `.po` source parser.
//!
//! Supports the subset of the gettext PO format produced by message
//! extractors: `msgctxt`, `msgid`, `msgid_plural`, `msgstr`, `msgstr[N]`,
//! continuation strings and `#,` flags. Obsolete (`#~`) entries and all other
//! comments are skipped.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::CatalogError;

/// A single translatable message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Disambiguating context (`msgctxt`).
    pub context: Option<String>,
    /// Source string. Empty for the catalog header.
    pub id: String,
    /// Plural source string (`msgid_plural`).
    pub id_plural: Option<String>,
    /// Translations. One entry for singular messages, one per plural form otherwise.
    pub strings: Vec<String>,
    /// Marked `#, fuzzy`.
    pub fuzzy: bool,
}

impl Message {
    /// Whether this is the catalog header entry (`msgid ""`).
    pub fn is_header(&self) -> bool {
        self.id.is_empty() && self.context.is_none()
    }

    /// Whether at least one translation string is non-empty.
    pub fn is_translated(&self) -> bool {
        self.strings.iter().any(|s| !s.is_empty())
    }
}

/// Parsed `.po` catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Messages in source order, header included.
    pub messages: Vec<Message>,
}

impl Catalog {
    /// Parse catalog source text.
    pub fn parse(source: &str) -> Result<Self, CatalogError> {
        Parser::default().run(source).map_err(|(line, message)| CatalogError::Syntax {
            path: PathBuf::new(),
            line,
            message,
        })
    }

    /// Header entry, if present.
    pub fn header(&self) -> Option<&Message> {
        self.messages.iter().find(|m| m.is_header())
    }
}

/// Which string a continuation line appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Context,
    Id,
    IdPlural,
    Str(usize),
}

#[derive(Debug, Default)]
struct Pending {
    context: Option<String>,
    id: Option<String>,
    id_plural: Option<String>,
    strings: BTreeMap<usize, String>,
    fuzzy: bool,
    start_line: usize,
}

impl Pending {
    fn is_empty(&self) -> bool {
        self.context.is_none() && self.id.is_none() && self.strings.is_empty()
    }
}

type ParseResult<T> = Result<T, (usize, String)>;

#[derive(Debug)]
struct Parser {
    messages: Vec<Message>,
    pending: Pending,
    field: Field,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            pending: Pending::default(),
            field: Field::None,
        }
    }
}

impl Parser {
    fn run(mut self, source: &str) -> ParseResult<Catalog> {
        for (idx, raw) in source.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() {
                self.flush()?;
                continue;
            }
            if let Some(flags) = line.strip_prefix("#,") {
                if !self.pending.strings.is_empty() {
                    self.flush()?;
                }
                if flags.split(',').any(|f| f.trim() == "fuzzy") {
                    self.pending.fuzzy = true;
                }
                continue;
            }
            if line.starts_with('#') {
                continue;
            }
            if line.starts_with('"') {
                self.continuation(line, line_no)?;
                continue;
            }
            self.keyword(line, line_no)?;
        }
        self.flush()?;
        Ok(Catalog {
            messages: self.messages,
        })
    }

    fn keyword(&mut self, line: &str, line_no: usize) -> ParseResult<()> {
        let (keyword, rest) = line
            .split_once(|c: char| c.is_ascii_whitespace())
            .ok_or_else(|| (line_no, format!("expected a quoted string after {line:?}")))?;
        let value = unquote(rest.trim(), line_no)?;

        match keyword {
            "msgctxt" => {
                if self.pending.id.is_some() {
                    self.flush()?;
                }
                self.start(line_no);
                self.pending.context = Some(value);
                self.field = Field::Context;
            }
            "msgid" => {
                if self.pending.id.is_some() {
                    self.flush()?;
                }
                self.start(line_no);
                self.pending.id = Some(value);
                self.field = Field::Id;
            }
            "msgid_plural" => {
                if self.pending.id.is_none() {
                    return Err((line_no, "msgid_plural without msgid".to_owned()));
                }
                self.pending.id_plural = Some(value);
                self.field = Field::IdPlural;
            }
            "msgstr" => {
                self.require_id(line_no, keyword)?;
                self.pending.strings.insert(0, value);
                self.field = Field::Str(0);
            }
            _ => {
                let index = keyword
                    .strip_prefix("msgstr[")
                    .and_then(|s| s.strip_suffix(']'))
                    .and_then(|s| s.parse::<usize>().ok())
                    .ok_or_else(|| (line_no, format!("unknown keyword {keyword:?}")))?;
                self.require_id(line_no, keyword)?;
                self.pending.strings.insert(index, value);
                self.field = Field::Str(index);
            }
        }
        Ok(())
    }

    fn continuation(&mut self, line: &str, line_no: usize) -> ParseResult<()> {
        let value = unquote(line, line_no)?;
        let target = match self.field {
            Field::None => return Err((line_no, "string outside of an entry".to_owned())),
            Field::Context => self.pending.context.as_mut(),
            Field::Id => self.pending.id.as_mut(),
            Field::IdPlural => self.pending.id_plural.as_mut(),
            Field::Str(n) => self.pending.strings.get_mut(&n),
        };
        if let Some(s) = target {
            s.push_str(&value);
        }
        Ok(())
    }

    fn start(&mut self, line_no: usize) {
        if self.pending.start_line == 0 {
            self.pending.start_line = line_no;
        }
    }

    fn require_id(&self, line_no: usize, keyword: &str) -> ParseResult<()> {
        if self.pending.id.is_none() {
            return Err((line_no, format!("{keyword} without msgid")));
        }
        Ok(())
    }

    fn flush(&mut self) -> ParseResult<()> {
        self.field = Field::None;
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return Ok(());
        }
        let Some(id) = pending.id else {
            return Err((pending.start_line, "msgctxt without msgid".to_owned()));
        };
        if pending.strings.is_empty() {
            return Err((pending.start_line, format!("missing msgstr for {id:?}")));
        }

        let strings = if pending.id_plural.is_some() {
            let forms = pending.strings.keys().max().map_or(0, |n| n + 1);
            (0..forms)
                .map(|n| pending.strings.get(&n).cloned().unwrap_or_default())
                .collect()
        } else {
            pending.strings.into_values().take(1).collect()
        };

        self.messages.push(Message {
            context: pending.context,
            id,
            id_plural: pending.id_plural,
            strings,
            fuzzy: pending.fuzzy,
        });
        Ok(())
    }
}

/// Strip the surrounding quotes and resolve C escapes.
fn unquote(s: &str, line_no: usize) -> ParseResult<String> {
    let inner = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .filter(|_| s.len() >= 2)
        .ok_or_else(|| (line_no, format!("malformed string {s}")))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            return Err((line_no, "dangling backslash".to_owned()));
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            '\\' | '"' | '\'' | '?' => out.push(esc),
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                let ch = char::from_u32(value)
                    .ok_or_else(|| (line_no, format!("invalid octal escape \\{value:o}")))?;
                out.push(ch);
            }
            other => return Err((line_no, format!("unknown escape \\{other}"))),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"# Translations for the admonitions chapter.
msgid ""
msgstr ""
"Project-Id-Version: sample 1.0\n"
"Content-Type: text/plain; charset=UTF-8\n"

#: ../../admonitions.md:3
msgid "Note"
msgstr "Hinweis"

#, fuzzy
msgid "Warning"
msgstr "Warnung"

msgctxt "button"
msgid "Open"
msgstr "Öffnen"

msgid "one file"
msgid_plural "%d files"
msgstr[0] "eine Datei"
msgstr[1] "%d Dateien"

msgid ""
"multi "
"line"
msgstr "mehr\tzeilig"

#~ msgid "Gone"
#~ msgstr "Weg"
"#;

    #[test]
    fn test_parse_sample() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.messages.len(), 6);

        let header = catalog.header().unwrap();
        assert!(header.strings[0].contains("charset=UTF-8"));

        assert_eq!(
            catalog.messages[1],
            Message {
                id: "Note".to_owned(),
                strings: vec!["Hinweis".to_owned()],
                ..Message::default()
            }
        );
        assert!(catalog.messages[2].fuzzy);
        assert_eq!(catalog.messages[3].context.as_deref(), Some("button"));
        assert_eq!(catalog.messages[3].strings, vec!["Öffnen".to_owned()]);

        let plural = &catalog.messages[4];
        assert_eq!(plural.id_plural.as_deref(), Some("%d files"));
        assert_eq!(
            plural.strings,
            vec!["eine Datei".to_owned(), "%d Dateien".to_owned()]
        );

        assert_eq!(catalog.messages[5].id, "multi line");
        assert_eq!(catalog.messages[5].strings[0], "mehr\tzeilig");
    }

    #[test]
    fn test_fuzzy_flag_applies_to_next_entry_only() {
        let src = "#, fuzzy, python-format\nmsgid \"a\"\nmsgstr \"b\"\nmsgid \"c\"\nmsgstr \"d\"\n";
        let catalog = Catalog::parse(src).unwrap();
        assert!(catalog.messages[0].fuzzy);
        assert!(!catalog.messages[1].fuzzy);
    }

    #[test]
    fn test_escapes() {
        let src = r#"msgid "q\"uote\\"
msgstr "tab\there\nnl \101"
"#;
        let catalog = Catalog::parse(src).unwrap();
        assert_eq!(catalog.messages[0].id, "q\"uote\\");
        assert_eq!(catalog.messages[0].strings[0], "tab\there\nnl A");
    }

    #[test]
    fn test_untranslated_message() {
        let catalog = Catalog::parse("msgid \"Tip\"\nmsgstr \"\"\n").unwrap();
        assert!(!catalog.messages[0].is_translated());
        assert!(!catalog.messages[0].is_header());
    }

    #[test]
    fn test_missing_msgstr_reports_line() {
        let err = Catalog::parse("\n\nmsgid \"orphan\"\n\n").unwrap_err();
        match err {
            CatalogError::Syntax { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("orphan"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unknown_keyword() {
        let err = Catalog::parse("msgfoo \"x\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown keyword"));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Catalog::parse("msgid \"open\nmsgstr \"\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::Syntax { line: 1, .. }));
    }
}
