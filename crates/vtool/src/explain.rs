use clap::Command;
use clap::arg;
use anyhow::Result;
use anyhow::Context;
use std::io::Write;
use version_ident::{DelimitedToken, Token, VersionIdentifier};

pub fn args() -> Command {
    Command::new("explain")
        .about("Show how a version is tokenized")
        .arg(arg!(version: <version> "Version to explain"))
        .arg(arg!(--json "Output json"))
}

fn kind(token: &Token) -> &'static str {
    match token {
        Token::Numerical(_) => "number",
        t if t.is_placeholder() => "placeholder",
        Token::CharacterSpan(_) => "text",
    }
}

fn segments(v: &VersionIdentifier) -> Vec<(&'static str, &[DelimitedToken])> {
    let mut out = vec![("release", v.release())];
    if let Some(pre) = v.pre_release() {
        out.push(("pre-release", pre));
    }
    if let Some(build) = v.build() {
        out.push(("build", build));
    }
    out
}

fn token_json(token: &DelimitedToken) -> serde_json::Value {
    let mut obj = serde_json::json!({
        "delimiter": token.delimiter().map(String::from),
        "kind": kind(token),
        "text": token.token().to_string(),
    });
    if let Some(num) = token.as_numerical() {
        obj["value"] = serde_json::Value::String(num.value().to_string());
        obj["zero_pad"] = num.zero_pad_length().into();
        obj["suffix"] = num.suffix().map(|s| s.text().to_string()).into();
    }
    obj
}

pub fn to_json(v: &VersionIdentifier) -> serde_json::Value {
    let mut obj = serde_json::json!({
        "input": v.to_string(),
        "normalized": v.render(true),
        "format": v.format().as_str(),
        "prefix": v.prefix().map(String::from),
        "build_separator": v.build_separator().map(|s| s.as_char().to_string()),
    });
    for (name, tokens) in segments(v) {
        obj[name] = tokens.iter().map(token_json).collect::<Vec<_>>().into();
    }
    obj
}

pub fn write_table<W: Write>(out: W, v: &VersionIdentifier) -> Result<()> {

    let mut tw = tabwriter::TabWriter::new(out);

    writeln!(&mut tw, "input\t{}", v)?;
    writeln!(&mut tw, "normalized\t{:#}", v)?;
    writeln!(&mut tw, "format\t{}", v.format())?;
    if let Some(sep) = v.build_separator() {
        writeln!(&mut tw, "build separator\t{}", sep.as_char())?;
    }
    writeln!(&mut tw)?;

    writeln!(&mut tw, "segment\tdelim\tkind\ttext\tvalue")?;
    for (name, tokens) in segments(v) {
        for t in tokens {
            let delim = t.delimiter().map(String::from).unwrap_or_default();
            let value = t.as_numerical().map(|n| n.value().to_string()).unwrap_or_default();
            writeln!(&mut tw, "{}\t{}\t{}\t{}\t{}", name, delim, kind(t), t.token(), value)?;
        }
    }

    tw.flush()?;
    Ok(())
}

pub fn main(matches: &clap::ArgMatches) -> Result<()> {

    let text = matches.get_one::<String>("version").context("version expected")?;
    let v = version_ident::parse(text);

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&to_json(&v))?;
        println!("{}", json);
    } else {
        write_table(std::io::stdout(), &v)?;
    }

    Ok(())
}
