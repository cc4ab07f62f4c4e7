use chessai::{Board, ChessRule, Side};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "List candidate squares for one piece", long_about = None)]
struct Args {
    #[arg(short, long)]
    x: i32,

    #[arg(short, long)]
    y: i32,

    /// Engine perspective
    #[arg(short, long, value_enum, default_value_t = Side::Red)]
    side: Side,

    /// Board as JSON rows (10 rows of 9 codes); defaults to the starting position
    #[arg(short, long)]
    board: Option<String>,
}

fn main() {
    let args = Args::parse();
    let is_red = args.side.is_red();

    let board = match args.board.as_deref() {
        Some(json) => match serde_json::from_str::<Board>(json) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("invalid board: {}", e);
                std::process::exit(2);
            }
        },
        None => Board::initial_board(is_red),
    };

    let rule = ChessRule::with_board(is_red, board);
    print!("{}", rule.board());

    let start = std::time::Instant::now();
    let moves = rule.candidate_moves(args.x, args.y);
    let duration = start.elapsed();

    println!(
        "({}, {}) -> {} candidates ({} us): {:?}",
        args.x,
        args.y,
        moves.len(),
        duration.as_micros(),
        moves
    );
}
