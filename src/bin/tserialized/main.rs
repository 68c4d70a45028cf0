//! tserialized CLI - Tool for encoding, decoding and inspecting temporal buffers.

use std::env;
use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use memmap2::Mmap;
use serde_json::{json, Value as Json};
use tracing_subscriber::EnvFilter;

use tserialized::codec::{self, Envelope};
use tserialized::geo::checked_srid;
use tserialized::prelude::*;

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "TSERIALIZED_LOG";

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = "info";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "error",
            _ => filtered_args.push(arg),
        }
    }
    init_tracing(level);

    if filtered_args.is_empty() {
        print_usage(&args[0]);
        return;
    }

    let result = match filtered_args[0] {
        "info" | "i" => match filtered_args.get(1) {
            Some(path) => cmd_info(path),
            None => usage_error(&args[0], "info <file.bin>"),
        },
        "decode" | "d" => match filtered_args.get(1) {
            Some(path) => cmd_decode(path),
            None => usage_error(&args[0], "decode <file.bin>"),
        },
        "encode" | "e" => match (filtered_args.get(1), filtered_args.get(2)) {
            (Some(input), Some(output)) => cmd_encode(input, output),
            _ => usage_error(&args[0], "encode <in.json> <out.bin>"),
        },
        "version" | "-V" | "--version" => {
            print_version();
            Ok(())
        }
        "help" | "h" | "-h" | "--help" => {
            print_usage(&args[0]);
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn usage_error(prog: &str, usage: &str) -> Result<()> {
    eprintln!("Usage: {} {}", prog, usage);
    std::process::exit(1)
}

fn print_usage(prog: &str) {
    println!("tserialized CLI - Encode, decode and inspect temporal buffers");
    println!();
    println!("Usage: {} [options] <command> <args>", prog);
    println!();
    println!("Commands:");
    println!("  i, info <file.bin>               Show envelope, sample count and size");
    println!("  d, decode <file.bin>             Decode and print as JSON");
    println!("  e, encode <in.json> <out.bin>    Encode a JSON temporal value");
    println!("  version                          Show version and build date");
    println!("  h, help                          Show this help");
    println!();
    println!("Options:");
    println!("  -v, --verbose  Debug output");
    println!("  -vv, --trace   Trace output (very verbose)");
    println!("  -q, --quiet    Errors only");
    println!();
    println!("Environment:");
    println!("  {}  Log filter (overrides -v/-q)", LOG_ENV);
}

fn print_version() {
    println!(
        "tserialized {} (built {} {})",
        env!("CARGO_PKG_VERSION"),
        env!("TSERIALIZED_BUILD_DATE"),
        env!("TSERIALIZED_BUILD_TIME")
    );
}

fn map_file(path: &str) -> Result<Mmap> {
    let file = File::open(path).with_context(|| format!("opening {}", path))?;
    // Safety: the file is opened read-only and not modified while mapped
    let mmap = unsafe { Mmap::map(&file) }.with_context(|| format!("mapping {}", path))?;
    tracing::debug!(path, size = mmap.len(), "mapped input");
    Ok(mmap)
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_info(path: &str) -> Result<()> {
    let mmap = map_file(path)?;
    let envelope = Envelope::parse(&mmap)?;

    println!("File:          {}", path);
    println!("Physical size: {} bytes", codec::physical_size(&mmap)?);
    println!("Base type:     {}", envelope.base_type);
    println!("Shape:         {}", envelope.subtype);
    println!("Flags:         {:?}", envelope.flags);
    match codec::sample_count(&mmap) {
        Ok(n) => println!("Samples:       {}", n),
        Err(e) => println!("Samples:       unavailable ({})", e),
    }
    Ok(())
}

fn cmd_decode(path: &str) -> Result<()> {
    let mmap = map_file(path)?;
    let temp = decode(&mmap)?;
    println!("{}", serde_json::to_string_pretty(&temporal_to_json(&temp)?)?);
    Ok(())
}

fn cmd_encode(input: &str, output: &str) -> Result<()> {
    let text = std::fs::read_to_string(input).with_context(|| format!("reading {}", input))?;
    let doc: Json = serde_json::from_str(&text).with_context(|| format!("parsing {}", input))?;
    let temp = temporal_from_json(&doc)?;
    let ts = encode(&temp)?;
    std::fs::write(Path::new(output), ts.as_bytes()).with_context(|| format!("writing {}", output))?;
    tracing::info!(output, size = ts.physical_size(), samples = temp.num_instants(), "encoded");
    Ok(())
}

// ============================================================================
// JSON conversion
// ============================================================================

fn temporal_from_json(doc: &Json) -> Result<Temporal> {
    let type_name = doc["type"].as_str().ok_or_else(|| anyhow!("missing \"type\""))?;
    let base = BaseType::from_name(type_name).ok_or_else(|| anyhow!("unknown type {:?}", type_name))?;
    let srid = match doc.get("srid") {
        Some(s) => srid_from_json(s)?,
        None if base == BaseType::GeogPoint => 4326,
        None => 0,
    };

    if let Some(sample) = doc.get("instant") {
        return Ok(instant_from_json(base, srid, sample)?.into());
    }

    let samples = doc["sequence"]
        .as_array()
        .ok_or_else(|| anyhow!("expected \"instant\" or \"sequence\""))?;
    let interp = match doc.get("interp").and_then(Json::as_str) {
        Some(name) => Interpolation::from_name(name).ok_or_else(|| anyhow!("unknown interp {:?}", name))?,
        None if base.is_continuous() => Interpolation::Linear,
        None => Interpolation::Step,
    };
    let lower_inc = doc.get("lower_inc").and_then(Json::as_bool).unwrap_or(true);
    let upper_inc = doc.get("upper_inc").and_then(Json::as_bool).unwrap_or(true);

    let instants = samples
        .iter()
        .map(|s| instant_from_json(base, srid, s))
        .collect::<Result<Vec<_>>>()?;
    Ok(TSequence::make(instants, lower_inc, upper_inc, interp)?.into())
}

fn srid_from_json(v: &Json) -> Result<i32> {
    let srid = v.as_i64().ok_or_else(|| anyhow!("\"srid\" must be an integer: {}", v))?;
    Ok(checked_srid(srid)?)
}

fn instant_from_json(base: BaseType, srid: i32, sample: &Json) -> Result<TInstant> {
    let pair = sample
        .as_array()
        .filter(|p| p.len() == 2)
        .ok_or_else(|| anyhow!("sample must be [timestamp, value]: {}", sample))?;
    let t = pair[0].as_i64().ok_or_else(|| anyhow!("timestamp must be an integer: {}", pair[0]))?;
    let v = &pair[1];

    let inst = match base {
        BaseType::Bool => TInstant::new(v.as_bool().ok_or_else(|| anyhow!("expected bool: {}", v))?, t),
        BaseType::Int => {
            let i = v.as_i64().ok_or_else(|| anyhow!("expected int: {}", v))?;
            TInstant::new(i32::try_from(i).context("int out of range")?, t)
        }
        BaseType::Float => TInstant::new(v.as_f64().ok_or_else(|| anyhow!("expected float: {}", v))?, t),
        BaseType::Text => TInstant::new(Text::new(v.as_str().ok_or_else(|| anyhow!("expected text: {}", v))?)?, t),
        BaseType::GeomPoint => TInstant::geom_point(coords_from_json(v)?, srid, t),
        BaseType::GeogPoint => TInstant::geog_point(coords_from_json(v)?, srid, t),
    };
    Ok(inst)
}

fn coords_from_json(v: &Json) -> Result<PointCoords> {
    let ords = v
        .as_array()
        .ok_or_else(|| anyhow!("point must be [x, y] or [x, y, z]: {}", v))?
        .iter()
        .map(|o| o.as_f64().ok_or_else(|| anyhow!("ordinate must be a number: {}", o)))
        .collect::<Result<Vec<f64>>>()?;
    match ords.as_slice() {
        [x, y] => Ok(PointCoords::xy(*x, *y)),
        [x, y, z] => Ok(PointCoords::xyz(*x, *y, *z)),
        _ => bail!("point must have 2 or 3 ordinates, got {}", ords.len()),
    }
}

fn temporal_to_json(temp: &Temporal) -> Result<Json> {
    let mut doc = json!({
        "type": temp.base_type().name(),
        "flags": temp.flags().bits(),
    });
    match temp {
        Temporal::Instant(inst) => {
            doc["instant"] = instant_to_json(inst)?;
        }
        Temporal::Sequence(seq) => {
            doc["interp"] = json!(seq.interpolation().name());
            doc["lower_inc"] = json!(seq.lower_inc());
            doc["upper_inc"] = json!(seq.upper_inc());
            doc["sequence"] = seq.instants().iter().map(instant_to_json).collect::<Result<Json>>()?;
        }
        Temporal::SequenceSet(_) => bail!("sequence sets are not supported"),
    }
    if let Some(srid) = temp.instant_n(0).and_then(|i| i.value().srid()) {
        doc["srid"] = json!(srid);
    }
    Ok(doc)
}

fn instant_to_json(inst: &TInstant) -> Result<Json> {
    let value = match inst.value() {
        Value::Bool(b) => json!(b),
        Value::Int(i) => json!(i),
        Value::Float(f) => json!(f),
        Value::Text(text) => json!(String::from_utf8_lossy(text.payload())),
        point @ (Value::GeomPoint(_) | Value::GeogPoint(_)) => {
            let coords = point
                .point_coords()
                .ok_or_else(|| anyhow!("not a point"))??;
            match coords.z() {
                Some(z) => json!([coords.x(), coords.y(), z]),
                None => json!([coords.x(), coords.y()]),
            }
        }
    };
    Ok(json!([inst.t(), value]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srid_range_checked() {
        assert_eq!(srid_from_json(&json!(4326)).unwrap(), 4326);
        assert!(srid_from_json(&json!(1 << 21)).is_err());
        assert!(srid_from_json(&json!(i64::from(i32::MAX) + 1)).is_err());
        assert!(srid_from_json(&json!("4326")).is_err());

        let doc = json!({"type": "geogpoint", "srid": 3_000_000, "instant": [1, [4.0, 50.0]]});
        assert!(temporal_from_json(&doc).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let doc = json!({"type": "geogpoint", "srid": 3812, "instant": [1, [4.0, 50.0]]});
        let temp = temporal_from_json(&doc).unwrap();
        let back = temporal_to_json(&decode(encode(&temp).unwrap().as_bytes()).unwrap()).unwrap();
        assert_eq!(back["srid"], json!(3812));
        assert_eq!(back["instant"], json!([1, [4.0, 50.0]]));
    }
}
