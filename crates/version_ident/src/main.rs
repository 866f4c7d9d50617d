use version_ident::*;

fn main() {

    let mut versions: Vec<_> = std::env::args().skip(1).map(|s| parse(&s)).collect();

    versions.sort();
    versions.dedup();

    for v in versions {
        println!("{v}");
    }
}
