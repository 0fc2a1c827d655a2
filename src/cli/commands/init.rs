use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::context::AppContext;
use crate::db::initialize::open_repository;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
///  - the initial document with the default branches
pub fn handle(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing SamiPro…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let mut repo = open_repository(&db_path, &ctx.cfg.storage_key)?;
    let doc = repo.load()?;

    println!(
        "✅ Database initialized at {} ({} branches)",
        &db_path,
        doc.branches.len()
    );
    println!("🎉 SamiPro initialization completed!");
    Ok(())
}
