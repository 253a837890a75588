use crate::{BuilderError, Expression};
use kif_model::{BlankNode, NamedNodePattern, RdfTerm, TermPattern, Variable};
use rustc_hash::FxHashSet;

/// A convenient builder for the text of SPARQL `select` queries.
///
/// The builder keeps a stack of open blocks. Patterns are appended to the innermost open block.
/// Blocks are opened and closed by the scoped helpers (e.g., [QueryBuilder::optional]), and a
/// block that is empty when it is closed is not emitted at all.
///
/// # Example
///
/// ```
/// use kif_sparql::QueryBuilder;
/// use kif_model::NamedNode;
///
/// let mut builder = QueryBuilder::new();
/// let s = builder.var("s");
/// let p = builder.var("p");
/// let o = builder.var("o");
/// builder.triple(s.clone(), p, o.clone());
/// builder.optional(|builder| {
///     let label = NamedNode::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label");
///     let value = builder.var("label");
///     builder.triple(o.clone(), label, value);
/// });
/// builder.limit(10);
///
/// let query = builder.select(&[s]).unwrap();
/// assert!(query.starts_with("select ?s where {"));
/// ```
#[derive(Debug)]
pub struct QueryBuilder {
    /// The open blocks. The first block is the body of the query.
    blocks: Vec<Block>,
    variables: FxHashSet<String>,
    next_bnode: usize,
    next_var: usize,
    distinct: bool,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Group,
    Optional,
    Union,
}

#[derive(Debug)]
struct Block {
    kind: BlockKind,
    elements: Vec<Element>,
}

impl Block {
    fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            elements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
enum Element {
    Triple(TermPattern, NamedNodePattern, TermPattern),
    Bind(Expression, Variable),
    Filter(Expression),
    Values(Variable, Vec<RdfTerm>),
    Group(Vec<Element>),
    Optional(Vec<Element>),
    Union(Vec<Vec<Element>>),
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new(BlockKind::Group)],
            variables: FxHashSet::default(),
            next_bnode: 0,
            next_var: 0,
            distinct: false,
            limit: None,
            offset: None,
        }
    }

    /// Returns the variable with the given name.
    ///
    /// Calling this method twice with the same name returns equal variables.
    pub fn var(&mut self, name: &str) -> Variable {
        self.variables.insert(name.to_owned());
        Variable::new_unchecked(name)
    }

    /// Returns a variable whose name starts with `prefix` and that is not yet used.
    pub fn fresh_var(&mut self, prefix: &str) -> Variable {
        loop {
            let name = format!("{prefix}{}", self.next_var);
            self.next_var += 1;
            if !self.variables.contains(&name) {
                return self.var(&name);
            }
        }
    }

    /// Returns a fresh blank node (`_:b0`, `_:b1`, ...).
    pub fn bnode(&mut self) -> BlankNode {
        let node = BlankNode::new_unchecked(format!("b{}", self.next_bnode));
        self.next_bnode += 1;
        node
    }

    pub fn bnodes(&mut self, count: usize) -> Vec<BlankNode> {
        (0..count).map(|_| self.bnode()).collect()
    }

    /// Returns whether the variable was introduced through this builder.
    pub fn is_known(&self, variable: &Variable) -> bool {
        self.variables.contains(variable.as_str())
    }

    pub fn triple(
        &mut self,
        subject: impl Into<TermPattern>,
        predicate: impl Into<NamedNodePattern>,
        object: impl Into<TermPattern>,
    ) -> &mut Self {
        self.push(Element::Triple(
            subject.into(),
            predicate.into(),
            object.into(),
        ))
    }

    pub fn triples(
        &mut self,
        triples: impl IntoIterator<Item = (TermPattern, NamedNodePattern, TermPattern)>,
    ) -> &mut Self {
        for (subject, predicate, object) in triples {
            self.triple(subject, predicate, object);
        }
        self
    }

    /// Binds the value of `expression` to `variable`.
    pub fn bind(&mut self, expression: impl Into<Expression>, variable: &Variable) -> &mut Self {
        self.variables.insert(variable.as_str().to_owned());
        self.push(Element::Bind(expression.into(), variable.clone()))
    }

    pub fn filter(&mut self, expression: impl Into<Expression>) -> &mut Self {
        self.push(Element::Filter(expression.into()))
    }

    /// Restricts `variable` to the given terms with an inline `values` block.
    pub fn values(
        &mut self,
        variable: &Variable,
        terms: impl IntoIterator<Item = impl Into<RdfTerm>>,
    ) -> &mut Self {
        self.variables.insert(variable.as_str().to_owned());
        let terms = terms.into_iter().map(Into::into).collect();
        self.push(Element::Values(variable.clone(), terms))
    }

    /// Emits the patterns added by `f` inside a `{ }` group.
    pub fn group<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped(BlockKind::Group, f)
    }

    /// Emits the patterns added by `f` inside an `optional { }` block.
    pub fn optional<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped(BlockKind::Optional, f)
    }

    /// Like [QueryBuilder::optional] if `condition` holds; otherwise, emits the patterns inline.
    pub fn optional_if<R>(&mut self, condition: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        if condition {
            self.optional(f)
        } else {
            f(self)
        }
    }

    /// Emits the union of the groups opened by `f`.
    ///
    /// Each group (or [QueryBuilder::try_group]) opened directly inside `f` becomes a branch of
    /// the union. A union with a single branch is emitted as a plain group.
    pub fn union<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped(BlockKind::Union, f)
    }

    /// Emits the patterns added by `f` inside a `{ }` group if `f` succeeds.
    ///
    /// If `f` returns an error, everything it added is discarded, including the variables it
    /// introduced.
    pub fn try_group<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let variables = self.variables.clone();
        self.blocks.push(Block::new(BlockKind::Group));
        let result = f(self);
        let block = self.pop_block();
        match result {
            Ok(_) => self.close(block),
            Err(_) => self.variables = variables,
        }
        result
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    pub fn limit(&mut self, limit: usize) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: usize) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    /// Returns whether nothing was emitted into the current block yet.
    pub fn is_empty(&self) -> bool {
        self.current().elements.is_empty()
    }

    /// Typesets the query projecting `projection`.
    ///
    /// An empty projection selects all variables (`*`). Returns an error if a projected variable
    /// was never introduced through this builder.
    pub fn select(&self, projection: &[Variable]) -> Result<String, BuilderError> {
        if let Some(unknown) = projection.iter().find(|variable| !self.is_known(variable)) {
            return Err(BuilderError::UnknownVariable(unknown.as_str().to_owned()));
        }

        let mut query = String::from("select ");
        if self.distinct {
            query.push_str("distinct ");
        }
        if projection.is_empty() {
            query.push('*');
        } else {
            let projection = projection
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            query.push_str(&projection.join(" "));
        }
        query.push_str(" where {\n");
        for block in &self.blocks {
            write_elements(&mut query, &block.elements, 1);
        }
        query.push_str("}\n");
        if let Some(limit) = self.limit {
            push_line(&mut query, 0, &format!("limit {limit}"));
        }
        if let Some(offset) = self.offset {
            push_line(&mut query, 0, &format!("offset {offset}"));
        }
        Ok(query)
    }

    fn current(&self) -> &Block {
        // The body block is never popped.
        &self.blocks[self.blocks.len() - 1]
    }

    fn push(&mut self, element: Element) -> &mut Self {
        if let Some(block) = self.blocks.last_mut() {
            block.elements.push(element);
        }
        self
    }

    fn scoped<R>(&mut self, kind: BlockKind, f: impl FnOnce(&mut Self) -> R) -> R {
        self.blocks.push(Block::new(kind));
        let result = f(self);
        let block = self.pop_block();
        self.close(block);
        result
    }

    fn pop_block(&mut self) -> Block {
        if self.blocks.len() > 1 {
            if let Some(block) = self.blocks.pop() {
                return block;
            }
        }
        Block::new(BlockKind::Group)
    }

    /// Appends a closed block to its parent, unless it is empty.
    fn close(&mut self, block: Block) {
        if block.elements.is_empty() {
            return;
        }
        let element = match block.kind {
            BlockKind::Group => Element::Group(block.elements),
            BlockKind::Optional => Element::Optional(block.elements),
            BlockKind::Union => {
                let mut branches = block
                    .elements
                    .into_iter()
                    .map(|element| match element {
                        Element::Group(elements) => elements,
                        other => vec![other],
                    })
                    .collect::<Vec<_>>();
                if branches.len() == 1 {
                    Element::Group(branches.remove(0))
                } else {
                    Element::Union(branches)
                }
            }
        };
        self.push(element);
    }
}

fn push_line(query: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        query.push_str("  ");
    }
    query.push_str(line);
    query.push('\n');
}

fn write_elements(query: &mut String, elements: &[Element], depth: usize) {
    for element in elements {
        write_element(query, element, depth);
    }
}

fn write_element(query: &mut String, element: &Element, depth: usize) {
    match element {
        Element::Triple(subject, predicate, object) => {
            push_line(query, depth, &format!("{subject} {predicate} {object} ."));
        }
        Element::Bind(expression, variable) => {
            push_line(query, depth, &format!("bind ({expression} as {variable})"));
        }
        Element::Filter(expression) => match expression {
            Expression::Equal(..) | Expression::And(..) | Expression::Or(..) => {
                push_line(query, depth, &format!("filter {expression}"));
            }
            _ => push_line(query, depth, &format!("filter ({expression})")),
        },
        Element::Values(variable, terms) => {
            let mut line = format!("values {variable} {{");
            for term in terms {
                line.push_str(&format!(" {term}"));
            }
            line.push_str(" }");
            push_line(query, depth, &line);
        }
        Element::Group(elements) => write_block(query, "{", elements, depth),
        Element::Optional(elements) => write_block(query, "optional {", elements, depth),
        Element::Union(branches) => {
            for (i, branch) in branches.iter().enumerate() {
                if i > 0 {
                    push_line(query, depth, "union");
                }
                write_block(query, "{", branch, depth);
            }
        }
    }
}

fn write_block(query: &mut String, open: &str, elements: &[Element], depth: usize) {
    push_line(query, depth, open);
    write_elements(query, elements, depth + 1);
    push_line(query, depth, "}");
}
