use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    quizgen::example_apps::run_generate_quiz(std::env::args().skip(1))
}
