use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use scriptwriter_rust::export::{export_script, write_export, ExportFormat};
use scriptwriter_rust::parser::{add_scene_numbers, extract_scenes, format_script_in_place};
use scriptwriter_rust::{Conf, DocumentStats, ElementType, Script};

#[derive(Parser, Debug)]
#[command(name = "scriptwriter")]
#[command(about = "剧本元素识别、排版与导出")]
struct Args {
    /// 剧本纯文本文件
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// 导出格式：pdf / txt / fdx
    #[arg(short, long, default_value = "pdf")]
    format: String,

    /// 输出路径，默认与输入同名
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 导出前整篇排版
    #[arg(long)]
    auto_format: bool,

    /// 把场景编号写进文本
    #[arg(long)]
    number_scenes: bool,

    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), String> {
    let format = ExportFormat::from_name(&args.format)
        .ok_or_else(|| format!("不支持的导出格式: {}", args.format))?;

    let conf = match &args.config {
        Some(path) => Conf::load(path).map_err(|e| format!("{}: {}", path.display(), e))?,
        None => Conf::default(),
    };

    let content = fs::read_to_string(&args.file)
        .map_err(|e| format!("读取文件失败: {}", e))?;

    let mut script = Script::from_text(&content);
    if args.auto_format {
        format_script_in_place(&mut script, &conf.rules);
    }
    if args.number_scenes {
        let numbered = add_scene_numbers(&script.text());
        for (line, text) in script.lines.iter_mut().zip(numbered.split('\n')) {
            line.text = text.to_string();
        }
    }

    let content = script.text();
    let stats = DocumentStats::from_text(&content);
    let scenes = extract_scenes(&script.texts());

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.file.with_extension(format.extension()));
    let bytes = export_script(&script, format, &conf).map_err(|e| format!("导出失败: {}", e))?;
    write_export(&output, &bytes).map_err(|e| format!("写入失败: {}", e))?;

    println!("处理完成！");
    println!("行数: {}", script.len());
    println!("场景数量: {}", scenes.len());
    println!("对白行数: {}", script.count_of(ElementType::Dialogue));
    println!("字数: {}", stats.word_count);
    println!("页数: {}", stats.page_count);
    println!("输出已保存到: {}", output.display());
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
