use gcode_fields::parser::LineBuffer;

fn main() {
    println!("=== Line Buffer Demo ===");

    let stream = b"G1X10Y20.5Z0.2\nM104S200\nG28\nG1X123456789012345678901234567890\n";
    let mut storage = [0u8; 24];
    let mut line = LineBuffer::new(&mut storage);

    for &c in stream {
        if !line.feed_char(c) {
            continue;
        }

        println!("\nLine: {:?}", String::from_utf8_lossy(line.line()));
        for letter in *b"GMXYZS" {
            if line.exists(letter) {
                println!("  {} = {}", char::from(letter), line.get(letter));
            }
        }
        line.reset();
    }
}
