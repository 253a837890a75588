mod pubchem;
mod wikidata;

use kif_compiler::{CompileError, CompileOptions, CompiledQuery, FilterCompiler, MappingRegistry};
use kif_filter::Filter;
use kif_model::Variable;
use spargebra::Query;
use std::error::Error;
use std::sync::Arc;

fn compile(registry: MappingRegistry, filter: &Filter) -> Result<Option<CompiledQuery>, CompileError> {
    FilterCompiler::new(Arc::new(registry)).compile(filter, &CompileOptions::default())
}

/// Compiles a filter that must yield a query, and checks that the query is valid SPARQL.
fn compile_valid(
    registry: MappingRegistry,
    filter: &Filter,
) -> Result<CompiledQuery, Box<dyn Error>> {
    let query = compile(registry, filter)?.ok_or("the filter compiled to no query")?;
    Query::parse(&query.text, None)?;
    Ok(query)
}

fn column_names(query: &CompiledQuery) -> Vec<&str> {
    query.variables.iter().map(Variable::as_str).collect()
}
