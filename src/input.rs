//! Line-oriented workload format.
//!
//! ```text
//! <topics> <questions> <queries>
//! <topic id> <x> <y>                      (one line per topic)
//! <question id> <k> <topic 1> ... <topic k> (one line per question)
//! <t|q> <target> <x> <y>                  (one line per query)
//! ```
//!
//! Lines after the last announced query are ignored. Each query is answered
//! with one line of space-separated IDs; unknown mode tags get an empty line.
//!
//! ```rust
//! use nearby::input::{format_answer, parse_workload};
//! use nearby::Config;
//!
//! let text = "2 2 1\n1 0.0 0.0\n2 0.0 0.0\n10 1 1\n11 1 2\nt 2 0.0 0.0\n";
//! let answers = parse_workload(text)?.run(Config::default())?;
//! assert_eq!(format_answer(&answers[0]), "2 1");
//! # Ok::<(), nearby::NearbyError>(())
//! ```

use crate::builder::NearbyBuilder;
use crate::config::Config;
use crate::error::{NearbyError, Result, Section};
use crate::nearby::Nearby;
use nearby_types::coordinate::Coordinate;
use nearby_types::ids::{QuestionId, TopicId};
use nearby_types::query::{Query, QueryMode};
use nearby_types::record::{QuestionRecord, TopicRecord};
use std::io::Write;
use std::str::FromStr;

/// Parsed records and queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workload {
    pub topics: Vec<TopicRecord>,
    pub questions: Vec<QuestionRecord>,
    pub queries: Vec<Query>,
}

impl Workload {
    /// Build the indexes for this workload's records.
    pub fn build(&self, config: Config) -> Result<Nearby> {
        NearbyBuilder::new()
            .config(config)
            .topics(self.topics.iter().copied())
            .questions(self.questions.iter().cloned())
            .build()
    }

    /// Build the indexes, then answer every query.
    pub fn run(self, config: Config) -> Result<Vec<Vec<i64>>> {
        let nearby = self.build(config)?;
        nearby.answer_all(&self.queries)
    }
}

/// Parse a whole workload. The first bad line aborts the parse.
pub fn parse_workload(input: &str) -> Result<Workload> {
    let mut lines = input.lines().enumerate().map(|(i, text)| (i + 1, text));

    let (line, header) = lines.next().ok_or(NearbyError::TruncatedInput {
        section: Section::Header,
        expected: 1,
        found: 0,
    })?;
    let (topic_count, question_count, query_count) = parse_header(line, header)?;

    let topics = take_section(&mut lines, Section::Topics, topic_count, parse_topic)?;
    let questions = take_section(&mut lines, Section::Questions, question_count, parse_question)?;
    let queries = take_section(&mut lines, Section::Queries, query_count, parse_query)?;

    log::debug!(
        "Parsed workload: {} topics, {} questions, {} queries",
        topics.len(),
        questions.len(),
        queries.len()
    );

    Ok(Workload {
        topics,
        questions,
        queries,
    })
}

fn take_section<'a, T>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    section: Section,
    count: usize,
    parse: fn(usize, &str) -> Result<T>,
) -> Result<Vec<T>> {
    // The header is untrusted; cap the up-front allocation.
    let mut records = Vec::with_capacity(count.min(1 << 16));
    for _ in 0..count {
        let Some((line, text)) = lines.next() else {
            return Err(NearbyError::TruncatedInput {
                section,
                expected: count,
                found: records.len(),
            });
        };
        records.push(parse(line, text)?);
    }
    Ok(records)
}

fn field<T: FromStr>(
    section: Section,
    line: usize,
    text: &str,
    name: &str,
    raw: &str,
) -> Result<T> {
    raw.parse().map_err(|_| {
        NearbyError::malformed(section, line, format!("invalid {} {:?}", name, raw), text)
    })
}

fn fields<'a, const N: usize>(
    section: Section,
    line: usize,
    text: &'a str,
) -> Result<[&'a str; N]> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    <[&str; N]>::try_from(parts).map_err(|parts| {
        NearbyError::malformed(
            section,
            line,
            format!("expected {} fields, found {}", N, parts.len()),
            text,
        )
    })
}

fn parse_header(line: usize, text: &str) -> Result<(usize, usize, usize)> {
    let [t, q, n] = fields::<3>(Section::Header, line, text)?;
    Ok((
        field(Section::Header, line, text, "topic count", t)?,
        field(Section::Header, line, text, "question count", q)?,
        field(Section::Header, line, text, "query count", n)?,
    ))
}

fn parse_topic(line: usize, text: &str) -> Result<TopicRecord> {
    let s = Section::Topics;
    let [id, x, y] = fields::<3>(s, line, text)?;
    Ok(TopicRecord {
        id: TopicId(field(s, line, text, "topic id", id)?),
        location: Coordinate::new(
            field(s, line, text, "x coordinate", x)?,
            field(s, line, text, "y coordinate", y)?,
        ),
    })
}

fn parse_question(line: usize, text: &str) -> Result<QuestionRecord> {
    let s = Section::Questions;
    let mut parts = text.split_whitespace();
    let (Some(id), Some(count)) = (parts.next(), parts.next()) else {
        return Err(NearbyError::malformed(
            s,
            line,
            "expected a question id and a topic count",
            text,
        ));
    };

    let id = QuestionId(field(s, line, text, "question id", id)?);
    let count: usize = field(s, line, text, "topic count", count)?;
    let topics = parts
        .map(|raw| field(s, line, text, "topic id", raw).map(TopicId))
        .collect::<Result<Vec<_>>>()?;

    if topics.len() != count {
        return Err(NearbyError::malformed(
            s,
            line,
            format!("declared {} topics, found {}", count, topics.len()),
            text,
        ));
    }

    Ok(QuestionRecord { id, topics })
}

fn parse_query(line: usize, text: &str) -> Result<Query> {
    let s = Section::Queries;
    let [tag, target, x, y] = fields::<4>(s, line, text)?;
    Ok(Query::new(
        QueryMode::from_tag(tag),
        field(s, line, text, "target count", target)?,
        Coordinate::new(
            field(s, line, text, "x coordinate", x)?,
            field(s, line, text, "y coordinate", y)?,
        ),
    ))
}

/// Space-separated decimal IDs.
pub fn format_answer(ids: &[i64]) -> String {
    let mut out = String::with_capacity(ids.len() * 8);
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&id.to_string());
    }
    out
}

/// Write one line per answer.
pub fn write_answers<W: Write>(out: &mut W, answers: &[Vec<i64>]) -> std::io::Result<()> {
    for ids in answers {
        writeln!(out, "{}", format_answer(ids))?;
    }
    out.flush()
}
