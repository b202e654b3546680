use clap::Parser;
use epub2json::Converter;

/// 📚 epub2json - EPUB转换工具
#[derive(Parser)]
#[command(name = "epub2json")]
#[command(about = "将EPUB文件转换为JSON和合并HTML的命令行工具")]
#[command(version)]
struct Args {
    /// EPUB文件路径
    #[arg(long, value_name = "FILE", help = "要转换的EPUB文件路径")]
    epub: String,

    /// 输出目录
    #[arg(long, value_name = "PATH", help = "转换产物的输出目录")]
    output: String,
}

fn main() {
    let args = Args::parse();

    println!("📚 epub2json - EPUB转换工具");

    let converter = Converter::new();
    match converter.run(&args.epub, &args.output) {
        Ok(_) => println!("🎉 已将 {} 转换为JSON！", args.epub),
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            std::process::exit(1);
        }
    }
}
