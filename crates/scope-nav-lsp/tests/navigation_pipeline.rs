use scope_nav::{Buffer, NavigationCommand, ScopeNavigator, ScopeOrigin};
use scope_nav_lsp::LspSymbolProvider;
use serde_json::json;

const TEXT: &str = "func alpha\n  body a\nfunc beta\n  body b\n";

fn symbols_payload() -> serde_json::Value {
    json!([{
        "name": "alpha",
        "kind": 12,
        "range": {
            "start": { "line": 0, "character": 0 },
            "end": { "line": 1, "character": 8 },
        },
        "selectionRange": {
            "start": { "line": 0, "character": 5 },
            "end": { "line": 0, "character": 10 },
        },
    }, {
        "name": "beta",
        "kind": 12,
        "range": {
            "start": { "line": 2, "character": 0 },
            "end": { "line": 3, "character": 8 },
        },
        "selectionRange": {
            "start": { "line": 2, "character": 5 },
            "end": { "line": 2, "character": 9 },
        },
    }])
}

#[test]
fn test_navigation_over_lsp_document_symbols() {
    let buffer = Buffer::from_text(TEXT);
    let mut provider = LspSymbolProvider::new();
    provider.update_document("a.x", &buffer, &symbols_payload());

    let mut nav = ScopeNavigator::with_defaults();

    // Inside alpha's body: up and down land on the symbol's span ends.
    let up = nav
        .navigate("a.x", &buffer, 14, NavigationCommand::GoToUpScope, &mut provider, None)
        .unwrap();
    assert_eq!(up.offset, 0);
    assert_eq!(up.origin, ScopeOrigin::Symbol);

    let down = nav
        .navigate("a.x", &buffer, 14, NavigationCommand::GoToDownScope, &mut provider, None)
        .unwrap();
    assert_eq!(down.offset, buffer.line_end(1));

    // No sibling among alpha's children; the search retries at the root level
    // and jumps past beta.
    let next = nav
        .navigate("a.x", &buffer, 14, NavigationCommand::GoPastNextScope, &mut provider, None)
        .unwrap();
    assert_eq!(next.offset, buffer.line_end(3));
    assert_eq!(next.origin, ScopeOrigin::Symbol);
}

#[test]
fn test_edit_picks_up_the_fresh_symbol_payload() {
    let buffer = Buffer::from_text(TEXT);
    let mut provider = LspSymbolProvider::new();
    provider.update_document("a.x", &buffer, &symbols_payload());

    let mut nav = ScopeNavigator::with_defaults();
    assert!(
        nav.navigate("a.x", &buffer, 14, NavigationCommand::GoToUpScope, &mut provider, None)
            .is_some()
    );

    // The server re-sends symbols after an edit; an empty payload means no
    // symbol scope remains at the cursor.
    provider.update_document("a.x", &buffer, &json!([]));
    nav.document_edited("a.x");
    assert!(
        nav.navigate("a.x", &buffer, 14, NavigationCommand::GoToUpScope, &mut provider, None)
            .is_none()
    );
}
