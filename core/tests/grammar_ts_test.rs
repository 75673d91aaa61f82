use revue_core::grammar::{GrammarRegistry, LineRange, NodeTag};
use revue_core::resolver::ContextResolver;

const TS_CLASS: &str = "\
export class Store {
  items: string[] = [];

  add(item: string): void {
    this.items.push(item);
  }
}
";

const TS_ARROW: &str = "\
const add = (a: number, b: number): number => {
  return a + b;
};
";

const TS_BROKEN: &str = "\
function broken( {
";

const TSX_COMPONENT: &str = "\
export function Banner({ text }: { text: string }) {
  return <div className=\"banner\">{text}</div>;
}
";

fn resolver_for<'a>(registry: &'a GrammarRegistry, ext: &str) -> ContextResolver<'a> {
    ContextResolver::new(registry.for_extension(ext).expect("grammar registered"))
}

#[test]
fn test_class_filling_file_beats_program() {
    let registry = GrammarRegistry::new();
    let resolver = resolver_for(&registry, "ts");

    // Range inside the method: the class spans rows 0-6, same as the
    // program root, and the inner node wins the tie.
    let ctx = resolver
        .find_enclosing_context(TS_CLASS, LineRange::line(4))
        .expect("valid source")
        .expect("expected an enclosing node");

    assert_eq!(ctx.tag, NodeTag::Class, "got: {ctx:?}");
    assert_eq!(ctx.kind, "class_declaration", "got: {ctx:?}");
    assert_eq!((ctx.start_line, ctx.end_line), (0, 6), "got: {ctx:?}");
}

#[test]
fn test_arrow_function_is_a_function_candidate() {
    let registry = GrammarRegistry::new();
    let resolver = resolver_for(&registry, "ts");

    let ctx = resolver
        .find_enclosing_context(TS_ARROW, LineRange::line(1))
        .expect("valid source")
        .expect("expected an enclosing node");

    // The arrow function's body row span matches the program's; innermost
    // equal-span candidate wins.
    assert_eq!(ctx.tag, NodeTag::Function, "got: {ctx:?}");
    assert_eq!(ctx.kind, "arrow_function", "got: {ctx:?}");
}

#[test]
fn test_tsx_component_resolves() {
    let registry = GrammarRegistry::new();
    let resolver = resolver_for(&registry, "tsx");

    let ctx = resolver
        .find_enclosing_context(TSX_COMPONENT, LineRange::line(1))
        .expect("valid source")
        .expect("expected an enclosing node");

    assert_eq!(ctx.tag, NodeTag::Function, "got: {ctx:?}");
    assert_eq!(ctx.kind, "function_declaration", "got: {ctx:?}");
    assert_eq!((ctx.start_line, ctx.end_line), (0, 2), "got: {ctx:?}");
}

#[test]
fn test_broken_ts_is_rejected_consistently() {
    let registry = GrammarRegistry::new();
    let resolver = resolver_for(&registry, "ts");

    let outcome = resolver.dry_run(TS_BROKEN);
    assert!(!outcome.valid, "got: {outcome:?}");

    let resolved = resolver.find_enclosing_context(TS_BROKEN, LineRange::line(0));
    assert!(resolved.is_err(), "got: {resolved:?}");
}
