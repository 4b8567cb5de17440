use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use uri_components::{
    parse_uri,
    pct_enc::{encode, table, Charset},
    Uri, UriComponentsBuilder,
};

criterion_group!(
    benches,
    bench_enc,
    bench_parse,
    bench_parse_strict,
    bench_build,
    bench_encode_components,
    bench_expand,
);
criterion_main!(benches);

const ENC_CASE: &str = "te😃a 测1`~!@试#$%st^&+=";

fn bench_enc(c: &mut Criterion) {
    c.bench_function("enc", |b| {
        b.iter(|| encode(black_box(ENC_CASE), table::QUERY, Charset::Utf8))
    });
}

const PARSE_CASE: &str = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| parse_uri(black_box(PARSE_CASE))));
}

fn bench_parse_strict(c: &mut Criterion) {
    c.bench_function("parse_strict", |b| b.iter(|| Uri::parse(black_box(PARSE_CASE))));
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build", |b| {
        b.iter(|| {
            UriComponentsBuilder::new()
                .scheme("https")
                .host(black_box("example.com"))
                .path("/api")
                .path_segment(&["users", "42"])
                .query_param("q", ["rust"])
                .build(false)
        })
    });
}

const TEMPLATE_CASE: &str = "https://{host}/hotels/{hotel}/rooms/{room}?q={q}";

fn bench_encode_components(c: &mut Criterion) {
    let components = UriComponentsBuilder::from_uri_string(TEMPLATE_CASE)
        .unwrap()
        .build(false)
        .unwrap();
    c.bench_function("encode_components", |b| {
        b.iter(|| black_box(&components).encode())
    });
}

fn bench_expand(c: &mut Criterion) {
    let components = UriComponentsBuilder::from_uri_string(TEMPLATE_CASE)
        .unwrap()
        .build(false)
        .unwrap();
    let vars = HashMap::from([
        ("host", "example.com"),
        ("hotel", "Grand Budapest"),
        ("room", "42"),
        ("q", "bed & breakfast"),
    ]);
    c.bench_function("expand", |b| {
        b.iter(|| black_box(&components).expand(&vars))
    });
}
