use revue_core::grammar::{GrammarRegistry, LineRange, NodeTag};
use revue_core::resolver::ContextResolver;

const RS_IMPL: &str = "\
impl Greeter {
    pub fn hello(&self) -> String {
        \"hi\".to_string()
    }
}
";

const RS_MIXED: &str = "\
pub struct Greeter {
    name: String,
}

fn main() {
    println!(\"hello\");
}
";

const RS_BROKEN: &str = "\
fn broken( {
";

fn rust_resolver(registry: &GrammarRegistry) -> ContextResolver<'_> {
    ContextResolver::new(registry.for_extension("rs").expect("rust grammar"))
}

#[test]
fn test_impl_block_filling_file_beats_source_file() {
    let registry = GrammarRegistry::new();
    let resolver = rust_resolver(&registry);

    // impl and source_file both span rows 0-4; the inner node wins the tie.
    let ctx = resolver
        .find_enclosing_context(RS_IMPL, LineRange::line(2))
        .expect("valid source")
        .expect("expected an enclosing node");

    assert_eq!(ctx.tag, NodeTag::Class, "got: {ctx:?}");
    assert_eq!(ctx.kind, "impl_item", "got: {ctx:?}");
    assert_eq!((ctx.start_line, ctx.end_line), (0, 4), "got: {ctx:?}");
}

#[test]
fn test_range_in_function_resolves_to_widest_container() {
    let registry = GrammarRegistry::new();
    let resolver = rust_resolver(&registry);

    // main() spans rows 4-6; source_file spans rows 0-6 and is larger.
    let ctx = resolver
        .find_enclosing_context(RS_MIXED, LineRange::line(5))
        .expect("valid source")
        .expect("expected an enclosing node");

    assert_eq!(ctx.tag, NodeTag::Module, "got: {ctx:?}");
    assert_eq!(ctx.kind, "source_file", "got: {ctx:?}");
    assert_eq!((ctx.start_line, ctx.end_line), (0, 6), "got: {ctx:?}");
}

#[test]
fn test_broken_rust_is_rejected_consistently() {
    let registry = GrammarRegistry::new();
    let resolver = rust_resolver(&registry);

    let outcome = resolver.dry_run(RS_BROKEN);
    assert!(!outcome.valid, "got: {outcome:?}");

    let resolved = resolver.find_enclosing_context(RS_BROKEN, LineRange::line(0));
    assert!(resolved.is_err(), "got: {resolved:?}");
}
