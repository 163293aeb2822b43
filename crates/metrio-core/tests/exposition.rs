//! End-to-end exposition fixtures against the public registry API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metrio_core::Registry;

#[test]
fn empty_registry_renders_empty_body() {
    let r = Registry::new();
    assert_eq!(r.render(), "");
}

#[test]
fn registered_but_unused_metrics_render_nothing() {
    let r = Registry::new();
    r.register_counter("c", "help").unwrap();
    r.register_histogram("h", "help", &[1.0]).unwrap();
    assert_eq!(r.render(), "");
}

#[test]
fn single_counter_series_exact_output() {
    let r = Registry::new();
    r.register_counter("http_requests_total", "Total HTTP requests served.")
        .unwrap();
    r.increment(
        "http_requests_total",
        &[("status", "200"), ("method", "GET"), ("path", "/")],
        42.0,
    )
    .unwrap();

    let body = r.render();
    assert_eq!(
        body,
        "# HELP http_requests_total Total HTTP requests served.\n\
         # TYPE http_requests_total counter\n\
         http_requests_total{method=\"GET\",path=\"/\",status=\"200\"} 42\n"
    );
    // Exactly one TYPE line, labels alphabetical.
    assert_eq!(body.matches("# TYPE").count(), 1);
}

#[test]
fn histogram_series_exact_output() {
    let r = Registry::new();
    r.register_histogram("rt", "", &[1.0, 5.0]).unwrap();
    for v in [0.5, 2.5, 7.5] {
        r.observe("rt", &[("route", "/")], v).unwrap();
    }

    assert_eq!(
        r.render(),
        "# TYPE rt histogram\n\
         rt_bucket{route=\"/\",le=\"1\"} 1\n\
         rt_bucket{route=\"/\",le=\"5\"} 2\n\
         rt_bucket{route=\"/\",le=\"+Inf\"} 3\n\
         rt_sum{route=\"/\"} 10.5\n\
         rt_count{route=\"/\"} 3\n"
    );
}

#[test]
fn unlabeled_series_render_without_braces() {
    let r = Registry::new();
    r.register_counter("up_total", "").unwrap();
    r.register_histogram("lat", "", &[1.0]).unwrap();
    r.inc("up_total", &[]).unwrap();
    r.observe("lat", &[], 0.5).unwrap();

    let body = r.render();
    assert!(body.contains("\nup_total 1\n"));
    assert!(body.contains("\nlat_bucket{le=\"1\"} 1\n"));
    assert!(body.contains("\nlat_sum 0.5\n"));
    assert!(body.contains("\nlat_count 1\n"));
}

#[test]
fn metric_names_and_series_are_sorted() {
    let r = Registry::new();
    r.register_counter("zebra_total", "").unwrap();
    r.register_counter("alpha_total", "").unwrap();
    r.inc("zebra_total", &[]).unwrap();
    r.inc("alpha_total", &[("k", "b")]).unwrap();
    r.inc("alpha_total", &[("k", "a")]).unwrap();

    let body = r.render();
    let alpha = body.find("# TYPE alpha_total").unwrap();
    let zebra = body.find("# TYPE zebra_total").unwrap();
    assert!(alpha < zebra);

    let a = body.find("alpha_total{k=\"a\"}").unwrap();
    let b = body.find("alpha_total{k=\"b\"}").unwrap();
    assert!(a < b);
}

#[test]
fn render_is_deterministic_for_unchanged_data() {
    let r = Registry::new();
    r.register_counter("c", "help").unwrap();
    r.register_histogram("h", "help", &[0.1, 1.0]).unwrap();
    for i in 0..20 {
        let v = i.to_string();
        r.inc("c", &[("i", v.as_str())]).unwrap();
        r.observe("h", &[("i", v.as_str())], 0.25).unwrap();
    }
    assert_eq!(r.render(), r.render());
}

#[test]
fn reset_renders_like_a_fresh_registry() {
    let fresh = Registry::new();
    fresh.register_counter("c", "help").unwrap();
    fresh.register_histogram("h", "help", &[1.0]).unwrap();

    let used = Registry::new();
    used.register_counter("c", "help").unwrap();
    used.register_histogram("h", "help", &[1.0]).unwrap();
    used.inc("c", &[("k", "v")]).unwrap();
    used.observe("h", &[("k", "v")], 0.5).unwrap();

    used.reset();
    assert_eq!(used.render(), fresh.render());
    assert_eq!(used.render(), "");
}

#[test]
fn label_values_are_escaped_on_output() {
    let r = Registry::new();
    r.register_counter("c", "").unwrap();
    r.inc("c", &[("k", "quote\"back\\slash\nnewline")]).unwrap();
    assert!(r
        .render()
        .contains("c{k=\"quote\\\"back\\\\slash\\nnewline\"} 1"));
}
