use crate::{Binding, DecodeError};
use json_event_parser::{JsonEvent, SliceJsonParser, WriterJsonSerializer};
use kif_model::Variable;
use sparesults::{
    QueryResultsFormat, QueryResultsParser, QuerySolution, ReaderQueryResultsParserOutput,
};

/// One page of SPARQL JSON results, parsed eagerly.
///
/// Rows are parsed one by one: a row holding a malformed term is kept as an error of its own
/// and does not affect the other rows of the page.
#[derive(Debug)]
pub struct ResultsPage {
    variables: Vec<Variable>,
    rows: Vec<Result<QuerySolution, String>>,
}

/// A results document split into its head and its rows, each kept as JSON events.
#[derive(Default)]
struct Document<'a> {
    head: Option<Vec<JsonEvent<'a>>>,
    rows: Vec<Vec<JsonEvent<'a>>>,
    boolean: bool,
}

impl ResultsPage {
    /// Parses a [SPARQL 1.1 JSON results](https://www.w3.org/TR/sparql11-results-json/) document.
    ///
    /// A boolean result is rejected with [DecodeError::NotSolutions]. The page fails as a whole
    /// only if the document itself is malformed.
    pub fn from_json(data: &[u8]) -> Result<Self, DecodeError> {
        let document = split(data)?;
        if document.boolean {
            return Err(DecodeError::NotSolutions);
        }
        let head = document.head.ok_or_else(|| DecodeError::MalformedDocument {
            message: "the document has no head".to_owned(),
        })?;

        let variables = match parse(&head, &[])? {
            ReaderQueryResultsParserOutput::Solutions(solutions) => solutions.variables().to_vec(),
            ReaderQueryResultsParserOutput::Boolean(_) => return Err(DecodeError::NotSolutions),
        };
        let rows = document
            .rows
            .iter()
            .map(|row| parse_row(&head, row))
            .collect();
        Ok(Self { variables, rows })
    }

    /// The variables declared in the head of the results.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The number of rows, including malformed ones.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the rows, in order.
    pub fn rows(&self) -> impl Iterator<Item = Result<Binding<'_>, DecodeError>> {
        self.rows.iter().map(|row| match row {
            Ok(solution) => Ok(Binding::new(solution)),
            Err(message) => Err(DecodeError::MalformedRow {
                message: message.clone(),
            }),
        })
    }

    /// Iterates over the well-formed rows.
    pub fn bindings(&self) -> impl Iterator<Item = Binding<'_>> {
        self.rows.iter().flatten().map(Binding::new)
    }
}

fn parse_row(head: &[JsonEvent<'_>], row: &[JsonEvent<'_>]) -> Result<QuerySolution, String> {
    let ReaderQueryResultsParserOutput::Solutions(mut solutions) =
        parse(head, row).map_err(|error| error.to_string())?
    else {
        return Err("expected solutions".to_owned());
    };
    match solutions.next() {
        Some(solution) => solution.map_err(|error| error.to_string()),
        None => Err("the row is empty".to_owned()),
    }
}

/// Parses a document made of `head` and of `row` as its only binding, if any.
fn parse(
    head: &[JsonEvent<'_>],
    row: &[JsonEvent<'_>],
) -> Result<ReaderQueryResultsParserOutput<std::io::Cursor<Vec<u8>>>, DecodeError> {
    let mut serializer = WriterJsonSerializer::new(Vec::new());
    let events = [JsonEvent::StartObject, JsonEvent::ObjectKey("head".into())]
        .into_iter()
        .chain(head.iter().cloned())
        .chain([
            JsonEvent::ObjectKey("results".into()),
            JsonEvent::StartObject,
            JsonEvent::ObjectKey("bindings".into()),
            JsonEvent::StartArray,
        ])
        .chain(row.iter().cloned())
        .chain([JsonEvent::EndArray, JsonEvent::EndObject, JsonEvent::EndObject]);
    for event in events {
        serializer.serialize_event(event).map_err(malformed)?;
    }
    let document = serializer.finish().map_err(malformed)?;
    let parser = QueryResultsParser::from_format(QueryResultsFormat::Json);
    Ok(parser.for_reader(std::io::Cursor::new(document))?)
}

fn split(data: &[u8]) -> Result<Document<'_>, DecodeError> {
    let mut parser = SliceJsonParser::new(data);
    let mut document = Document::default();
    expect(&mut parser, &JsonEvent::StartObject)?;
    loop {
        match parser.parse_next()? {
            JsonEvent::ObjectKey(key) => match &*key {
                "head" => document.head = Some(read_value(&mut parser)?),
                "results" => read_results(&mut parser, &mut document.rows)?,
                "boolean" => {
                    read_value(&mut parser)?;
                    document.boolean = true;
                }
                _ => {
                    read_value(&mut parser)?;
                }
            },
            JsonEvent::EndObject => return Ok(document),
            event => return Err(unexpected(&event)),
        }
    }
}

fn read_results<'a>(
    parser: &mut SliceJsonParser<'a>,
    rows: &mut Vec<Vec<JsonEvent<'a>>>,
) -> Result<(), DecodeError> {
    expect(parser, &JsonEvent::StartObject)?;
    loop {
        match parser.parse_next()? {
            JsonEvent::ObjectKey(key) if key == "bindings" => {
                expect(parser, &JsonEvent::StartArray)?;
                loop {
                    let event = parser.parse_next()?;
                    if event == JsonEvent::EndArray {
                        break;
                    }
                    rows.push(read_rest(parser, event)?);
                }
            }
            JsonEvent::ObjectKey(_) => {
                read_value(parser)?;
            }
            JsonEvent::EndObject => return Ok(()),
            event => return Err(unexpected(&event)),
        }
    }
}

/// Reads one complete JSON value.
fn read_value<'a>(parser: &mut SliceJsonParser<'a>) -> Result<Vec<JsonEvent<'a>>, DecodeError> {
    let first = parser.parse_next()?;
    read_rest(parser, first)
}

/// Reads the rest of the JSON value starting with `first`.
fn read_rest<'a>(
    parser: &mut SliceJsonParser<'a>,
    first: JsonEvent<'a>,
) -> Result<Vec<JsonEvent<'a>>, DecodeError> {
    let mut events = Vec::new();
    let mut depth = 0_usize;
    let mut event = first;
    loop {
        match event {
            JsonEvent::StartArray | JsonEvent::StartObject => depth += 1,
            JsonEvent::EndArray | JsonEvent::EndObject => {
                depth = depth.checked_sub(1).ok_or_else(|| unexpected(&event))?;
            }
            JsonEvent::Eof => return Err(unexpected(&event)),
            _ => {}
        }
        events.push(event);
        if depth == 0 {
            return Ok(events);
        }
        event = parser.parse_next()?;
    }
}

fn expect(parser: &mut SliceJsonParser<'_>, expected: &JsonEvent<'_>) -> Result<(), DecodeError> {
    let event = parser.parse_next()?;
    if event == *expected {
        Ok(())
    } else {
        Err(unexpected(&event))
    }
}

fn unexpected(event: &JsonEvent<'_>) -> DecodeError {
    DecodeError::MalformedDocument {
        message: format!("unexpected {event:?}"),
    }
}

fn malformed(error: std::io::Error) -> DecodeError {
    DecodeError::MalformedDocument {
        message: error.to_string(),
    }
}
