//! Scenario tests: input programs against their expected kind sequences.

use crate::{classify, tokens, Error, Mark, TokenKind};

use TokenKind::*;

/// Classifies `src` and returns the emitted kinds, minus the closing EOF.
fn kinds(src: &str, module: bool) -> Vec<TokenKind> {
    let mut out = Vec::new();
    classify(src, module, |t| out.push(t.kind())).expect("classification failed");
    assert_eq!(out.last(), Some(&Eof), "stream must end with EOF");
    out.pop();
    out
}

fn script(src: &str) -> Vec<TokenKind> {
    kinds(src, false)
}

#[test]
fn empty_input() {
    assert_eq!(script(""), vec![]);
    assert_eq!(script("\n"), vec![]);
    assert_eq!(script("  \t \n\n "), vec![]);
}

#[test]
fn single_symbol() {
    assert_eq!(script("foo"), vec![Start, Symbol, Semicolon]);
}

#[test]
fn simple_declaration() {
    assert_eq!(
        script("var x = 1;"),
        vec![Start, Keyword, Symbol, Op, Number, Semicolon]
    );
}

#[test]
fn ternary_pairs() {
    assert_eq!(
        script("a ? : :\n?:"),
        vec![Start, Symbol, Ternary, Close, Colon, Start, Ternary, Close, Semicolon]
    );
}

#[test]
fn let_as_symbol() {
    assert_eq!(script("+let"), vec![Start, Op, Symbol, Semicolon]);
}

#[test]
fn invalid_keyword_use_ignored() {
    // `if` in expression position stays a keyword; the slash after `)` in
    // this statement is division
    assert_eq!(
        script("x = if (a) /123/"),
        vec![Start, Symbol, Op, Keyword, Paren, Symbol, Close, Op, Number, Op, Semicolon]
    );
}

#[test]
fn control_keyword_on_new_line_restarts() {
    assert_eq!(
        script("x =\n if (a) /123/"),
        vec![
            Start, Symbol, Op, Semicolon, Start, Keyword, Paren, Symbol, Close, Attach, Regexp,
            Semicolon,
        ]
    );
}

#[test]
fn function_decl_then_regexp() {
    assert_eq!(
        script("function foo(y) {} / 100 /"),
        vec![
            Start, Keyword, Symbol, Paren, Symbol, Close, Exec, Close, Start, Regexp, Semicolon,
        ]
    );
}

#[test]
fn class_decl_then_regexp() {
    assert_eq!(
        script("class {} / 100 /"),
        vec![Start, Keyword, Dict, Close, Start, Regexp, Semicolon]
    );
}

#[test]
fn function_expression_then_division() {
    assert_eq!(
        script("(function(y) {} / 100 /)"),
        vec![
            Start, Paren, Keyword, Paren, Symbol, Close, Exec, Close, Op, Number, Op, Close,
            Semicolon,
        ]
    );
}

#[test]
fn async_arrow_resolution() {
    assert_eq!(
        script("async () => await /123/"),
        vec![Start, Lit, Paren, Close, Keyword, Arrow, Op, Regexp, Semicolon]
    );
}

#[test]
fn async_arrow_resolution_marks() {
    let mut toks = Vec::new();
    classify("async () => await /123/", false, |t| {
        toks.push((t.kind(), t.mark(), t.span(), t.line_no()));
    })
    .expect("classification failed");

    let lit = toks.iter().find(|t| t.0 == Lit).expect("provisional async");
    let resolved = toks
        .iter()
        .find(|t| t.1 == Mark::Resolve)
        .expect("resolved async");
    assert_eq!(resolved.0, Keyword);
    assert_eq!(lit.2, resolved.2, "resolution re-emits the same bytes");
    assert_eq!(lit.3, resolved.3, "resolution re-emits the same line");
}

#[test]
fn chained_async_arrows() {
    assert_eq!(
        script("() => async () => await\n/123/\nawait /1/"),
        vec![
            Start, Paren, Close, Arrow, Lit, Paren, Close, Keyword, Arrow, Op, Regexp, Semicolon,
            Start, Symbol, Op, Number, Op, Semicolon,
        ]
    );
}

#[test]
fn class_expression() {
    assert_eq!(
        script("x = class Foo extends {} { if(x) {} } /123/"),
        vec![
            Start, Symbol, Op, Keyword, Symbol, Keyword, Dict, Close, Dict, Symbol, Paren, Symbol,
            Close, Exec, Close, Close, Op, Number, Op, Semicolon,
        ]
    );
}

#[test]
fn dict_string_method_name() {
    assert_eq!(
        script("+{'abc'() {}}"),
        vec![Start, Op, Dict, String, Paren, Close, Exec, Close, Close, Semicolon]
    );
}

#[test]
fn dict_after_comma() {
    assert_eq!(
        script(",{}"),
        vec![Start, Op, Dict, Close, Semicolon]
    );
}

#[test]
fn asi_for_postfix_expression() {
    assert_eq!(
        script("a\n++\nb"),
        vec![Start, Symbol, Semicolon, Start, Op, Symbol, Semicolon]
    );
}

#[test]
fn yield_is_symbol_outside_generator() {
    assert_eq!(script("yield"), vec![Start, Symbol, Semicolon]);
}

#[test]
fn dict_method_modifiers() {
    assert_eq!(
        script("void {async * get get() {}}"),
        vec![
            Start, Op, Dict, Keyword, Op, Keyword, Symbol, Paren, Close, Exec, Close, Close,
            Semicolon,
        ]
    );
}

#[test]
fn yield_is_op_inside_generator() {
    assert_eq!(
        script("function*() { yield /123/ }"),
        vec![
            Start, Keyword, Op, Paren, Close, Exec, Start, Op, Regexp, Semicolon, Close,
        ]
    );
}

#[test]
fn yield_is_restricted() {
    assert_eq!(
        script("function*() { yield\n/123/ }"),
        vec![
            Start, Keyword, Op, Paren, Close, Exec, Start, Op, Semicolon, Start, Regexp,
            Semicolon, Close,
        ]
    );
}

#[test]
fn yield_restriction_ignored_in_group() {
    assert_eq!(
        script("function*() { (yield\n/123/) }"),
        vec![
            Start, Keyword, Op, Paren, Close, Exec, Start, Paren, Op, Regexp, Close, Semicolon,
            Close,
        ]
    );
}

#[test]
fn for_head_matches_let_only_at_front() {
    assert_eq!(
        script("for(let x;let;);"),
        vec![
            Start, Keyword, Paren, Keyword, Symbol, Semicolon, Symbol, Semicolon, Close, Attach,
            Semicolon,
        ]
    );
}

#[test]
fn for_await_matches_keyword() {
    assert_eq!(
        script("for await(let x);"),
        vec![Start, Keyword, Keyword, Paren, Keyword, Symbol, Close, Attach, Semicolon]
    );
}

#[test]
fn for_of_is_an_operator() {
    assert_eq!(
        script("for(const x of bar);"),
        vec![
            Start, Keyword, Paren, Keyword, Symbol, Op, Symbol, Close, Attach, Semicolon,
        ]
    );
}

#[test]
fn use_strict_reserves_strict_keywords() {
    assert_eq!(
        script("'use strict'; protected + x;"),
        vec![
            Start, String, Semicolon, Start, Keyword, Op, Symbol, Semicolon,
        ]
    );
}

#[test]
fn use_strict_not_after_label() {
    assert_eq!(
        script("foo: 'use strict'; protected;"),
        vec![
            Start, Label, Colon, Attach, String, Semicolon, Start, Symbol, Semicolon,
        ]
    );
}

#[test]
fn use_strict_only_at_function_top() {
    assert_eq!(
        script("if {'use strict';protected+x}"),
        vec![
            Start, Keyword, Attach, Exec, Start, String, Semicolon, Start, Symbol, Op, Symbol,
            Semicolon, Close,
        ]
    );
}

#[test]
fn use_strict_reserves_let() {
    assert_eq!(
        script("'use strict'; let"),
        vec![Start, String, Semicolon, Start, Keyword]
    );
}

#[test]
fn asi_between_values() {
    assert_eq!(
        script("123\n'zing'"),
        vec![Start, Number, Semicolon, Start, String, Semicolon]
    );
}

#[test]
fn do_while_block() {
    assert_eq!(
        script("do {} while ();"),
        vec![Start, Keyword, Attach, Exec, Close, Keyword, Paren, Close, Semicolon]
    );
}

#[test]
fn do_while_asi_in_body() {
    assert_eq!(
        script("do foo\nwhile(0)"),
        vec![
            Start, Keyword, Attach, Symbol, Semicolon, Keyword, Paren, Number, Close, Semicolon,
        ]
    );
}

#[test]
fn do_while_then_statement() {
    assert_eq!(
        script("do;while()bar"),
        vec![
            Start, Keyword, Attach, Semicolon, Keyword, Paren, Close, Semicolon, Start, Symbol,
            Semicolon,
        ]
    );
}

#[test]
fn do_while_then_regexp() {
    // the while head leaves no value; the next statement starts with a regexp
    assert_eq!(
        script("do;while()\n/foo/"),
        vec![
            Start, Keyword, Attach, Semicolon, Keyword, Paren, Close, Semicolon, Start, Regexp,
            Semicolon,
        ]
    );
}

#[test]
fn do_while_as_attached_statement() {
    assert_eq!(
        script("if () do ; while (0);"),
        vec![
            Start, Keyword, Paren, Close, Attach, Keyword, Attach, Semicolon, Keyword, Paren,
            Number, Close, Semicolon,
        ]
    );
}

#[test]
fn arrow_function_body_asi() {
    assert_eq!(
        script("{_ => {}}"),
        vec![Start, Exec, Start, Symbol, Arrow, Exec, Close, Semicolon, Close]
    );
}

#[test]
fn arrow_function_body_has_value() {
    assert_eq!(
        script("{_ => {}/123/g;}"),
        vec![
            Start, Exec, Start, Symbol, Arrow, Exec, Close, Op, Number, Op, Symbol, Semicolon,
            Close,
        ]
    );
}

#[test]
fn empty_case_clause() {
    assert_eq!(
        script("switch { default: }"),
        vec![Start, Keyword, Attach, Exec, Start, Keyword, Colon, Close]
    );
}

#[test]
fn dict_method_after_bare_colon() {
    assert_eq!(
        script("void {:,get x() {}}"),
        vec![
            Start, Op, Dict, Colon, Op, Keyword, Symbol, Paren, Close, Exec, Close, Close,
            Semicolon,
        ]
    );
}

#[test]
fn dict_closed_on_right_side() {
    assert_eq!(
        script("+{x:}"),
        vec![Start, Op, Dict, Symbol, Colon, Close, Semicolon]
    );
}

#[test]
fn dict_computed_method() {
    assert_eq!(
        script("void {[] () {}}"),
        vec![
            Start, Op, Dict, Array, Close, Paren, Close, Exec, Close, Close, Semicolon,
        ]
    );
}

#[test]
fn module_import_clause() {
    assert_eq!(
        kinds("import foo, {zing as what} from 'blah'", true),
        vec![
            Start, Keyword, Symbol, Op, Dict, Symbol, Keyword, Symbol, Close, Keyword, String,
            Semicolon,
        ]
    );
}

#[test]
fn module_import_bare_specifier() {
    assert_eq!(
        kinds("import 'foo';", true),
        vec![Start, Keyword, String, Semicolon]
    );
}

#[test]
fn module_export_star() {
    assert_eq!(
        kinds("export * from 'x'", true),
        vec![Start, Keyword, Symbol, Keyword, String, Semicolon]
    );
}

#[test]
fn module_export_declaration_attaches() {
    assert_eq!(
        kinds("export var x = 1;", true),
        vec![Start, Keyword, Attach, Keyword, Symbol, Op, Number, Semicolon]
    );
    assert_eq!(
        kinds("export default function f() {}", true),
        vec![
            Start, Keyword, Keyword, Attach, Keyword, Symbol, Paren, Close, Exec, Close,
        ]
    );
}

#[test]
fn module_statements_only_at_top_level() {
    // inside a block, `import` is just an invalid keyword
    assert_eq!(
        kinds("{import x}", true),
        vec![Start, Exec, Start, Keyword, Symbol, Semicolon, Close]
    );
}

#[test]
fn static_method() {
    assert_eq!(
        script("class X { static x() {} }"),
        vec![
            Start, Keyword, Symbol, Dict, Keyword, Symbol, Paren, Close, Exec, Close, Close,
        ]
    );
}

#[test]
fn async_after_dot_is_a_symbol() {
    assert_eq!(
        script(".async()"),
        vec![Start, Op, Symbol, Paren, Close, Semicolon]
    );
}

#[test]
fn await_as_class_name_inside_async() {
    assert_eq!(
        script("async () => class await {}"),
        vec![
            Start, Lit, Paren, Close, Keyword, Arrow, Keyword, Keyword, Dict, Close, Semicolon,
        ]
    );
}

#[test]
fn escaped_quote_in_string() {
    assert_eq!(script("'foo\\'bar'"), vec![Start, String, Semicolon]);
}

#[test]
fn break_does_not_consume_a_close() {
    assert_eq!(
        script("{break}"),
        vec![Start, Exec, Start, Keyword, Semicolon, Close]
    );
}

#[test]
fn break_with_label() {
    assert_eq!(
        script("x: break x;"),
        vec![Start, Label, Colon, Attach, Keyword, Label, Semicolon]
    );
}

#[test]
fn hoisted_function_stops_statement() {
    assert_eq!(
        script("abc\nfunction foo() {}"),
        vec![
            Start, Symbol, Semicolon, Start, Keyword, Symbol, Paren, Close, Exec, Close,
        ]
    );
}

#[test]
fn async_function_survives_newline() {
    assert_eq!(
        script("async\nfunction\nfoo() {}"),
        vec![Start, Keyword, Keyword, Symbol, Paren, Close, Exec, Close]
    );
}

#[test]
fn await_with_unary_lookahead() {
    // `~` reads as a value start, so await is a keyword here
    assert_eq!(
        script("await ~123"),
        vec![Start, Keyword, Op, Number, Semicolon]
    );
    // `+` does not, so await stays a symbol
    assert_eq!(
        script("await +123"),
        vec![Start, Symbol, Op, Number, Semicolon]
    );
}

#[test]
fn hashbang_is_a_comment() {
    assert_eq!(script("#!hello"), vec![Comment]);
    assert_eq!(
        script("#!hello /*\nfoo"),
        vec![Comment, Start, Symbol, Semicolon]
    );
    assert_eq!(script("#!hello\n//foo"), vec![Comment, Comment]);
}

#[test]
fn class_extends_member_expression() {
    assert_eq!(
        script("class X extends foo.bar { if() {} }"),
        vec![
            Start, Keyword, Symbol, Keyword, Symbol, Op, Symbol, Dict, Symbol, Paren, Close,
            Exec, Close, Close,
        ]
    );
}

#[test]
fn class_extends_parenthesized_ternary() {
    assert_eq!(
        script("class X extends (y?z:w) {}"),
        vec![
            Start, Keyword, Symbol, Keyword, Paren, Symbol, Ternary, Symbol, Close, Symbol,
            Close, Dict, Close,
        ]
    );
}

#[test]
fn ternary_close_has_no_value() {
    assert_eq!(
        script("?:/foo/"),
        vec![Start, Ternary, Close, Regexp, Semicolon]
    );
}

#[test]
fn division_after_bracket_close() {
    assert_eq!(
        script("a[0] /2/"),
        vec![Start, Symbol, Array, Number, Close, Op, Number, Op, Semicolon]
    );
}

#[test]
fn control_with_trailing_statement() {
    assert_eq!(
        script("if foo\nbar"),
        vec![
            Start, Keyword, Attach, Symbol, Semicolon, Start, Symbol, Semicolon,
        ]
    );
}

#[test]
fn attach_chains() {
    assert_eq!(
        script("if()try{}finally{}"),
        vec![
            Start, Keyword, Paren, Close, Attach, Keyword, Attach, Exec, Close, Start, Keyword,
            Attach, Exec, Close,
        ]
    );
}

#[test]
fn solo_async_call() {
    assert_eq!(
        script("async(a)"),
        vec![Start, Lit, Paren, Symbol, Close, Symbol, Semicolon]
    );

    let mut marks = Vec::new();
    classify("async(a)", false, |t| marks.push((t.kind(), t.mark()))).unwrap();
    assert!(
        marks.contains(&(Symbol, Mark::Resolve)),
        "the call resolves the provisional async to a symbol"
    );
}

#[test]
fn label_attaches_statement() {
    assert_eq!(
        script("if foo: 1"),
        vec![Start, Keyword, Attach, Label, Colon, Attach, Number, Semicolon]
    );
}

#[test]
fn return_takes_a_dict() {
    assert_eq!(
        script("return {}"),
        vec![Start, Keyword, Dict, Close, Semicolon]
    );
}

#[test]
fn nested_template_literal() {
    assert_eq!(
        script("`a${`b${c}`}d`"),
        vec![
            Start, String, TemplateBrace, String, TemplateBrace, Symbol, Close, String, Close,
            String, Semicolon,
        ]
    );
}

#[test]
fn leading_regexp() {
    assert_eq!(script("/foo/.test(x)"), {
        vec![Start, Regexp, Op, Symbol, Paren, Symbol, Close, Semicolon]
    });
}

#[test]
fn stray_close_is_fatal() {
    // a close with nothing open fails the session; everything before it was
    // already delivered
    let mut out = Vec::new();
    let err = classify("x;}", false, |t| out.push(t.kind())).unwrap_err();
    assert_eq!(err, Error::Stack);
    assert_eq!(out, vec![Start, Symbol, Semicolon]);
}

#[test]
fn unterminated_group_is_a_stack_error() {
    let mut out = Vec::new();
    let err = classify("(a", false, |t| out.push(t.kind())).unwrap_err();
    assert_eq!(err, Error::Stack);
    // the partial stream, EOF included, was still delivered
    assert_eq!(out, vec![Start, Paren, Symbol, Eof]);
}

#[test]
fn deep_nesting_overflows() {
    let src = "(".repeat(600);
    assert_eq!(classify(&src, false, |_| {}).unwrap_err(), Error::Stack);
}

#[test]
fn lit_never_reaches_the_sink_unresolved() {
    let sources = [
        "var x = 1;",
        "async () => await 1",
        "async(a)",
        "a ? b : c",
        "for (const x of y) {}",
        "class X extends Y { m() {} }",
    ];
    for src in sources {
        let mut lits = Vec::new();
        classify(src, false, |t| {
            if t.kind() == Lit {
                lits.push((t.span(), t.mark()));
            }
        })
        .unwrap();
        // any provisional lit must be resolved later in the stream
        for (span, _) in &lits {
            let mut resolved = false;
            classify(src, false, |t| {
                if t.mark() == Mark::Resolve && t.span() == *span {
                    resolved = true;
                }
            })
            .unwrap();
            assert!(resolved, "unresolved provisional lit in {src:?}");
        }
    }
}

#[test]
fn keyword_lit_identities() {
    let mut lits = Vec::new();
    classify("var x = 1;", false, |t| lits.push(t.lit())).unwrap();
    assert_eq!(lits[1], Some(tokens::Lit::Var));
    assert_eq!(lits[2], None); // user identifier
    assert_eq!(lits[3], Some(tokens::Lit::Assign));
}

#[test]
fn virtual_semicolon_has_no_bytes() {
    let mut semis = Vec::new();
    classify("foo\nbar;", false, |t| {
        if t.kind() == Semicolon {
            semis.push((t.span().len(), t.line_no()));
        }
    })
    .unwrap();
    assert_eq!(semis.len(), 2);
    assert_eq!(semis[0], (0, 1)); // inserted; bears the previous line
    assert_eq!(semis[1], (1, 2)); // real
}
