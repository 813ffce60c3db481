//! repofilter 命令行：查看模式分解结果与渲染出的 SQL
use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use repofilter::{
    BindCounter, ConditionBuilder, ConfigManager, Decision, PatternCompiler, Predicate, SqlFragment,
};

#[derive(Parser, Debug)]
#[command(name = "repofilter", version, about = "Explain how repository-name regexes decompose into SQL predicates")]
struct Cli {
    /// 待分析的正则
    #[arg(required = true)]
    patterns: Vec<String>,

    /// 区分大小写
    #[arg(short = 'c', long)]
    case_sensitive: bool,

    /// 列名
    #[arg(long, default_value = "name")]
    column: String,

    /// 以 JSON 输出
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Explanation<'a> {
    pattern: &'a str,
    decision: Decision,
    sql: SqlFragment,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = ConfigManager::custom()
        .case_sensitive(cli.case_sensitive)
        .column(cli.column.clone())
        .build()?;
    let compiler = PatternCompiler::new(&config);
    let builder = ConditionBuilder::new(config);

    for pattern in &cli.patterns {
        let decision = compiler
            .compile(pattern)
            .with_context(|| format!("invalid pattern {pattern:?}"))?;
        let group = builder.build(&decision);
        let sql = group.to_sql(&mut BindCounter::new());

        if cli.json {
            let explanation = Explanation { pattern: pattern.as_str(), decision, sql };
            println!("{}", serde_json::to_string(&explanation)?);
        } else {
            println!("{pattern}");
            println!("  decision: {decision}");
            if group.is_always() {
                println!("  (no constraint)");
            } else {
                let ops: Vec<&str> = group.predicates.iter().map(Predicate::op_name).collect();
                println!("  ops:      {}", ops.join(" OR "));
            }
            println!("  sql:      {}", sql.sql);
            println!("  args:     {}", serde_json::to_string(&sql.args)?);
        }
    }
    Ok(())
}
