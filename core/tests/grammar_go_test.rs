use revue_core::grammar::{GrammarRegistry, LineRange, NodeTag};
use revue_core::resolver::ContextResolver;

const GO_SOURCE: &str = "\
package main

import \"fmt\"

type Server struct {
	Port int
}

func (s *Server) Start() error {
	fmt.Println(\"starting\")
	return nil
}
";

const GO_BROKEN: &str = "\
func broken( {
";

fn go_resolver(registry: &GrammarRegistry) -> ContextResolver<'_> {
    ContextResolver::new(registry.for_extension("go").expect("go grammar"))
}

#[test]
fn test_range_in_method_resolves_to_source_file() {
    let registry = GrammarRegistry::new();
    let resolver = go_resolver(&registry);

    // The method spans rows 8-11; the file root spans rows 0-11 and wins.
    let ctx = resolver
        .find_enclosing_context(GO_SOURCE, LineRange::new(9, 10).unwrap())
        .expect("valid source")
        .expect("expected an enclosing node");

    assert_eq!(ctx.tag, NodeTag::Module, "got: {ctx:?}");
    assert_eq!(ctx.kind, "source_file", "got: {ctx:?}");
    assert_eq!((ctx.start_line, ctx.end_line), (0, 11), "got: {ctx:?}");
}

#[test]
fn test_range_past_go_file_returns_none() {
    let registry = GrammarRegistry::new();
    let resolver = go_resolver(&registry);

    let ctx = resolver
        .find_enclosing_context(GO_SOURCE, LineRange::new(40, 41).unwrap())
        .expect("out-of-range input must not be an error");
    assert!(ctx.is_none(), "got: {ctx:?}");
}

#[test]
fn test_broken_go_is_rejected_consistently() {
    let registry = GrammarRegistry::new();
    let resolver = go_resolver(&registry);

    let outcome = resolver.dry_run(GO_BROKEN);
    assert!(!outcome.valid, "got: {outcome:?}");
    assert!(
        outcome.error.as_deref().unwrap_or("").contains("syntax error"),
        "diagnostic should describe the failure, got: {outcome:?}"
    );

    let resolved = resolver.find_enclosing_context(GO_BROKEN, LineRange::line(0));
    assert!(resolved.is_err(), "got: {resolved:?}");
}
