use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jtree::dom::DomParser;
use jtree::{AngleGrammar, JsonGrammar, Value};
use pprof::criterion::{Output, PProfProfiler};

fn load(filename: &str) -> Value {
    let parser: DomParser = DomParser::new();
    parser
        .parse_file(format!("fixtures/json/valid/{}.json", filename))
        .unwrap()
}

fn benchmark_encode_person(c: &mut Criterion) {
    let root = load("person");
    c.bench_function("Encode of person", |b| b.iter(|| black_box(root.encode())));
}

fn benchmark_encode_nested(c: &mut Criterion) {
    let root = load("nested");
    c.bench_function("Encode of nested", |b| b.iter(|| black_box(root.encode())));
}

fn benchmark_reencode_person(c: &mut Criterion) {
    let root = load("person");
    c.bench_function("Re-encode of person with angle delimiters", |b| {
        b.iter(|| {
            let angled = root.encode_with::<AngleGrammar>();
            let parser: DomParser<AngleGrammar> = DomParser::new();
            let reparsed = parser.parse_str(&angled).unwrap();
            black_box(reparsed.encode_with::<JsonGrammar>())
        })
    });
}

criterion_group! {
    name = encoding_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = benchmark_encode_person, benchmark_encode_nested, benchmark_reencode_person
}
criterion_main!(encoding_benches);
