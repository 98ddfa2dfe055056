use divan::AllocProfiler;
use divan::{Bencher, black_box};
use docquery::{Document, DocumentBuilder, QueryTerms, by_class, by_tag, parse_selector};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

/// A table of `rows` rows, each with a link cell and a text cell
fn create_document(rows: usize) -> Document {
    let mut builder = DocumentBuilder::new();
    builder.start_element("table", &[("class", "results")]);
    for row in 0..rows {
        let class = if row % 10 == 0 { "row odd marked" } else { "row" };
        builder.start_element("tr", &[("class", class)]);
        builder.start_element("td", &[]);
        let href = format!("/item/{}", row);
        builder.start_element("a", &[("href", href.as_str())]);
        builder.text("item");
        builder.end_element().unwrap();
        builder.end_element().unwrap();
        builder.start_element("td", &[]);
        builder.text("some cell text");
        builder.end_element().unwrap();
        builder.end_element().unwrap();
    }
    builder.end_element().unwrap();
    builder.finish().unwrap()
}

#[divan::bench(args = [100, 1000, 10000])]
fn build_document(bencher: Bencher, rows: usize) {
    bencher.bench_local(|| black_box(create_document(black_box(rows))));
}

#[divan::bench(args = [100, 1000, 10000])]
fn walk_descendants(bencher: Bencher, rows: usize) {
    let doc = create_document(rows);
    bencher.bench_local(|| black_box(doc.root().descendants().count()));
}

#[divan::bench(args = [100, 1000, 10000])]
fn get_all_by_class(bencher: Bencher, rows: usize) {
    let doc = create_document(rows);
    let query = by_class("marked").unwrap();
    bencher.bench_local(|| black_box(doc.get_all(black_box(&query)).len()));
}

#[divan::bench(args = [100, 1000, 10000])]
fn get_last_link(bencher: Bencher, rows: usize) {
    let doc = create_document(rows);
    let href = format!("/item/{}", rows - 1);
    let query = by_tag("a").unwrap().by_href(href.as_str());
    bencher.bench_local(|| black_box(doc.get(black_box(&query))));
}

#[divan::bench(args = [100, 1000, 10000])]
fn get_all_by_text(bencher: Bencher, rows: usize) {
    let doc = create_document(rows);
    let query = by_tag("td").unwrap().by_text("item");
    bencher.bench_local(|| black_box(doc.get_all(black_box(&query)).len()));
}

#[divan::bench]
fn reject_selector() {
    black_box(parse_selector(black_box("tr.row.marked > td, :not(.row)")).is_err());
}

#[divan::bench]
fn compile_selector() {
    black_box(parse_selector(black_box("tr.row.marked, a[href^='/item/' i], td:not([class])")).unwrap());
}
