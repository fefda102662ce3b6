use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use colorscheme_tools::{build::{from_color_list, from_functions},
                        color::Luv,
                        extract_weighted, remap, sort, ColorModel, ColorRange,
                        Color, ExtractOptions, PixelMatrix, RGBColor, Scheme,
                        SchemeLibrary, SortField, DEFAULT_WEIGHTED_LENGTH};

type Err = Box<dyn Error>;

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn gray(c: Color) -> RGB8 {
    let l = Luv::from_rgb(c).l / 100.;
    RGB8::from_rgb(Color::new(l, l, l))
}

fn table_of_colors(fh: &mut impl Write, colors: &[Color],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                css_string(RGB8::from_rgb(c)))?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: {}\"></td>",
                 css_string(gray(c)))?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn scheme(fh: &mut impl Write, s: &Scheme, width: u32) -> Result<(), Err> {
    let comment = format!("{} ({} colors) {}", s.name(), s.len(), s.notes());
    table_of_colors(fh, s.colors(), width, &comment)
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("gradient.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>colorscheme-tools: test {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    writeln!(fh, "<h3>Built-in schemes</h3>")?;
    let lib = SchemeLibrary::builtin();
    for name in lib.names() {
        if let Some(s) = lib.get(name) {
            scheme(&mut fh, s, 3)?;
        }
    }

    writeln!(fh, "<h3>Generator functions</h3>")?;
    let hsv = from_functions(|t| 360. * t, |_| 0.8, |_| 1., 150,
                             ColorModel::Hsv)?.named("hue");
    scheme(&mut fh, &hsv, 2)?;
    let lch = from_functions(|t| 20. + 70. * t, |_| 40., |t| 360. * t, 150,
                             ColorModel::Lchab)?.named("lch spiral");
    scheme(&mut fh, &lch, 2)?;
    let list = from_color_list(&[Color::new(0.37, 0., 0.39),
                                 Color::new(1., 0.92, 0.67)], 10)?
        .named("list");
    scheme(&mut fh, &list, 40)?;
    table_of_colors(&mut fh, &list.sample(150), 2, "list (interpolated)")?;

    writeln!(fh, "<h3>Sorted</h3>")?;
    for (field, label) in [(SortField::Luminance, "L"), (SortField::U, "u"),
                           (SortField::V, "v")] {
        let s = sort(&hsv, field, false);
        table_of_colors(&mut fh, s.colors(), 2,
                        &format!("hue sorted on {label}"))?;
    }

    writeln!(fh, "<h3>Extracted and weighted</h3>")?;
    let img = PixelMatrix::from_fn(64, 64, |x, y| {
        lch.rgb(((x * x + y * y) as f64).sqrt() / 90.5) });
    let e = extract_weighted(&img, &ExtractOptions::default().n(6))?;
    let extracted = sort(&e.scheme, SortField::Luminance, false);
    table_of_colors(&mut fh, extracted.colors(), 40,
                    &format!("6 colors, converged: {}", e.converged))?;
    let w = e.into_weighted()?.resample(DEFAULT_WEIGHTED_LENGTH)?;
    table_of_colors(&mut fh, w.colors(), 8, "weighted")?;
    if let Some(hot) = lib.get("hot") {
        let r = remap(hot, &img)?;
        let row = r.rows().next().unwrap_or_default();
        table_of_colors(&mut fh, row, 6, "first row remapped to hot")?;
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
