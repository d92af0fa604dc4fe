//! fusegate-cli — 集群弹性配置巡检工具：查询属性键、查看并强制切换熔断器状态
//!
//! Usage:
//!   fusegate-cli keys <service> <host:port>[,<host:port>...]   Discover property keys
//!   fusegate-cli breakers <host:port>                          List circuit breakers
//!   fusegate-cli breaker <host:port> <key>                     Show one circuit breaker
//!   fusegate-cli trip <host:port> <key> <OPEN|CLOSED|HALF_OPEN> Force a breaker state

use anyhow::{anyhow, bail, Context};
use fusegate::{Fusegate, Instance, ServiceId, StaticDirectory};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "keys" => cmd_keys(&args[2..]).await,
        "breakers" => cmd_breakers(&args[2..]).await,
        "breaker" => cmd_breaker(&args[2..]).await,
        "trip" => cmd_trip(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("fusegate-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"fusegate-cli — fleet resilience configuration inspector

USAGE:
    fusegate-cli <COMMAND> [ARGS]

COMMANDS:
    keys <service> <host:port>[,...]              Union of property keys across instances
    breakers <host:port>                          List circuit breakers on one instance
    breaker <host:port> <key>                     Show one circuit breaker
    trip <host:port> <key> <OPEN|CLOSED|HALF_OPEN>  Force a breaker into a state
    version                                       Show version information
    help                                          Show this help message

ENVIRONMENT:
    FUSEGATE_HTTP_TIMEOUT_SECS    Per-instance call timeout (default 5)"#
    );
}

fn parse_instance(spec: &str) -> anyhow::Result<Instance> {
    let (host, port) = spec
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("expected host:port, got {spec:?}"))?;
    let port: u16 = port.parse().with_context(|| format!("bad port in {spec:?}"))?;
    if host.is_empty() {
        bail!("empty host in {spec:?}");
    }
    Ok(Instance::new(host, port))
}

async fn cmd_keys(args: &[String]) -> anyhow::Result<()> {
    let [service, instances] = args else {
        bail!("usage: fusegate-cli keys <service> <host:port>[,...]");
    };
    let service = ServiceId::new(service)?;
    let instances = instances
        .split(',')
        .map(parse_instance)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let gate = Fusegate::builder()
        .directory(Arc::new(
            StaticDirectory::new().with_service(service.clone(), instances),
        ))
        .build()?;

    let mut keys: Vec<String> = gate.property_keys(&service).await?.into_iter().collect();
    keys.sort();
    if keys.is_empty() {
        println!("no property keys reported for {service}");
    } else {
        for key in keys {
            println!("{key}");
        }
    }
    Ok(())
}

async fn cmd_breakers(args: &[String]) -> anyhow::Result<()> {
    let [instance] = args else {
        bail!("usage: fusegate-cli breakers <host:port>");
    };
    let instance = parse_instance(instance)?;
    let gate = Fusegate::builder().build()?;

    match gate.circuit_breakers(&instance).await? {
        Some(breakers) if !breakers.is_empty() => {
            for breaker in breakers {
                println!("{:<40} {}", breaker.name, breaker.state.as_str());
            }
        }
        _ => println!("{instance} exposes no circuit breakers"),
    }
    Ok(())
}

async fn cmd_breaker(args: &[String]) -> anyhow::Result<()> {
    let [instance, key] = args else {
        bail!("usage: fusegate-cli breaker <host:port> <key>");
    };
    let instance = parse_instance(instance)?;
    let gate = Fusegate::builder().build()?;

    match gate.circuit_breaker(&instance, key).await? {
        Some(breaker) => println!("{:<40} {}", breaker.name, breaker.state.as_str()),
        None => println!("{instance} has no circuit breaker named {key}"),
    }
    Ok(())
}

async fn cmd_trip(args: &[String]) -> anyhow::Result<()> {
    let [instance, key, state] = args else {
        bail!("usage: fusegate-cli trip <host:port> <key> <OPEN|CLOSED|HALF_OPEN>");
    };
    let instance = parse_instance(instance)?;
    let state = state.parse().map_err(|e: String| anyhow!(e))?;
    let gate = Fusegate::builder().build()?;

    match gate.set_circuit_breaker(&instance, key, state).await? {
        Some(breaker) => println!("{:<40} {}", breaker.name, breaker.state.as_str()),
        None => println!("{instance} has no circuit breaker named {key}"),
    }
    Ok(())
}
