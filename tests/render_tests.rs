use callsite_stats::callsite::{
    collect_func_call_site_stats, FuncCallSiteStats, FuncCallSiteStatsRepo, FuncId, NameCount,
};
use callsite_stats::loader::parse_go_source;
use callsite_stats::render::{render_to_string, TextRenderer};
use pretty_assertions::assert_eq;
use std::path::Path;

fn analyze(body: &str) -> FuncCallSiteStatsRepo {
    let source = format!("package p\n\nfunc run() {{\n{}\n}}\n", body);
    let unit = parse_go_source(&source, Path::new("p.go")).unwrap();
    let mut repo = FuncCallSiteStatsRepo::new();
    collect_func_call_site_stats(&unit, &mut repo);
    repo
}

#[test]
fn test_positions_are_ranked_independently() {
    let repo = analyze("x, err := foo(a, b)\ny, err2 := foo(c, b)");

    let text = render_to_string(&repo, 4);

    assert_eq!(
        text,
        concat!(
            "x2:    x:1, err:1     = foo(a:1, b:2)\n",
            "       y:1, err2:1         (c:1)\n",
        )
    );
}

#[test]
fn test_ignored_row_and_no_assignment_marker() {
    let repo = analyze("log(msg)\nlog(err)");

    let text = render_to_string(&repo, 2);

    assert_eq!(
        text,
        concat!(
            "x2:  (no assignments)  = log(err:1)\n",
            "                            (msg:1)\n",
            "     (ignored):2            ()\n",
        )
    );
}

#[test]
fn test_function_without_names_renders_one_row() {
    let mut repo = FuncCallSiteStatsRepo::new();
    repo.add(
        FuncId::new("tick"),
        &FuncCallSiteStats {
            call_count: 3,
            argument_name_count: vec![NameCount::new(), NameCount::new()],
            ..Default::default()
        },
    );

    assert_eq!(render_to_string(&repo, 4), "x3:    (no assignments)    = tick()\n");
}

#[test]
fn test_functions_ordered_by_call_count() {
    let repo = analyze("v := b()\nw := a()\nz := b()");

    let text = render_to_string(&repo, 1);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("x2:"));
    assert!(lines[0].ends_with("= b()"));
    assert!(lines[2].starts_with("x1:"));
    assert!(lines[2].ends_with("= a()"));
}

#[test]
fn test_rendering_is_deterministic() {
    let repo = analyze("p, q := pair(l, r)\np2, q := pair(r, l)\nsingle(l)\nn := single(r)");

    let first = render_to_string(&repo, 4);
    let second = render_to_string(&repo.clone(), 4);

    assert_eq!(first, second);
}

#[test]
fn test_renderer_streams_to_writer() {
    let repo = analyze("a := f(x)");

    let mut renderer = TextRenderer::new(Vec::new());
    renderer.encode_all(&repo);
    let out = renderer.finish().unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "x1:    a:1    = f(x:1)\n");
}

#[test]
fn test_blank_targets_are_still_assignments() {
    let repo = analyze("_ = foo(a)");

    assert_eq!(render_to_string(&repo, 4), "x1:        = foo(a:1)\n");
}

#[test]
fn test_field_target_in_multi_assignment_has_no_marker() {
    let repo = analyze("s.f, y = q(), r()");

    let text = render_to_string(&repo, 4);

    assert!(!text.contains("(no assignments)"));
    assert!(text.lines().any(|line| line.ends_with("= q()")));
    assert!(text.lines().any(|line| line.contains("y:1") && line.ends_with("= r()")));
}

#[test]
fn test_blank_argument_slot_has_no_dangling_comma() {
    let repo = analyze("foo(a, c)\nfoo(a, d)\nfoo(1, d)");

    let text = render_to_string(&repo, 4);

    assert_eq!(
        text,
        concat!(
            "x3:    (no assignments)    = foo(a:2, d:2)\n",
            "                                (     c:1)\n",
            "       (ignored):3              ()\n",
        )
    );
}
