//! Demo portfolio document used by `simulate` and the integration tests.
//!
//! Layout (document coordinates, viewport 800 px):
//!
//! ```text
//!    0  #home        hero, typewriter
//!  800  #about       three stat cards
//! 1500  #skills      skills grid, 6 cards
//! 2300  #projects    projects grid, 4 cards with lazy images
//! 3200  #experience  timeline
//! 3900  #contact     contact card and form
//! 4600  footer       current year
//! ```

use crate::memory::{ElementSpec, MemorySurface};
use crate::surface::ElementRef;

pub const VIEWPORT_HEIGHT: f64 = 800.0;
pub const HEADER_HEIGHT: f64 = 80.0;

pub const SECTIONS: [(&str, f64, f64); 6] = [
    ("home", 0.0, 800.0),
    ("about", 800.0, 700.0),
    ("skills", 1500.0, 800.0),
    ("projects", 2300.0, 900.0),
    ("experience", 3200.0, 700.0),
    ("contact", 3900.0, 700.0),
];

pub const STATS: [(&str, &str); 3] = [("50+", "Projects"), ("3", "Years"), ("100%", "Commitment")];

pub const SKILL_COUNT: usize = 6;
pub const PROJECT_COUNT: usize = 4;

/// Build the demo document.
pub fn portfolio_page() -> MemorySurface {
    let mut doc = MemorySurface::new(VIEWPORT_HEIGHT);
    let body = doc.body();

    let overlay = doc.append(body, ElementSpec::new("div").id("loading-screen"));
    doc.append(overlay, ElementSpec::new("p").text("Loading..."));

    let header = doc.append(
        body,
        ElementSpec::new("header").id("header").bounds(0.0, HEADER_HEIGHT),
    );
    let menu = doc.append(body, ElementSpec::new("div").id("mobile-menu"));
    for (id, _, _) in SECTIONS {
        let href = format!("#{id}");
        doc.append(
            header,
            ElementSpec::new("a").class("nav-link").attr("href", &href).text(id),
        );
        doc.append(
            menu,
            ElementSpec::new("a")
                .class("mobile-nav-link")
                .attr("href", &href)
                .text(id),
        );
    }
    doc.append(header, ElementSpec::new("button").id("hamburger"));

    let sections: Vec<ElementRef> = SECTIONS
        .iter()
        .map(|(id, top, height)| {
            doc.append(body, ElementSpec::new("section").id(id).bounds(*top, *height))
        })
        .collect();

    home(&mut doc, sections[0]);
    about(&mut doc, sections[1]);
    skills(&mut doc, sections[2]);
    projects(&mut doc, sections[3]);
    experience(&mut doc, sections[4]);
    contact(&mut doc, sections[5]);

    let footer = doc.append(body, ElementSpec::new("footer").bounds(4600.0, 200.0));
    doc.append(footer, ElementSpec::new("span").id("currentYear").text("2024"));
    doc.append(body, ElementSpec::new("button").id("scrollToTop"));
    doc
}

fn home(doc: &mut MemorySurface, section: ElementRef) {
    let hero = doc.append(section, ElementSpec::new("div").id("hero").bounds(0.0, 800.0));
    let intro = doc.append(
        hero,
        ElementSpec::new("div").class("fade-in-up").bounds(300.0, 200.0),
    );
    doc.append(intro, ElementSpec::new("h1").text("Hi, I'm a developer"));
    doc.append(intro, ElementSpec::new("span").id("typewriter"));
}

fn about(doc: &mut MemorySurface, section: ElementRef) {
    doc.append(
        section,
        ElementSpec::new("div").class("fade-in-left").bounds(900.0, 250.0),
    );
    for (value, label) in STATS {
        let card = doc.append(
            section,
            ElementSpec::new("div").class("stat-card").bounds(1200.0, 150.0),
        );
        doc.append(card, ElementSpec::new("div").class("stat-number").text(value));
        doc.append(card, ElementSpec::new("p").text(label));
    }
}

fn skills(doc: &mut MemorySurface, section: ElementRef) {
    let grid = doc.append(
        section,
        ElementSpec::new("div").class("skills-grid").bounds(1600.0, 600.0),
    );
    for i in 0..SKILL_COUNT {
        doc.append(
            grid,
            ElementSpec::new("div")
                .class("skill-card")
                .text(&format!("Skill {}", i + 1)),
        );
    }
}

fn projects(doc: &mut MemorySurface, section: ElementRef) {
    let grid = doc.append(
        section,
        ElementSpec::new("div").class("projects-grid").bounds(2400.0, 700.0),
    );
    for i in 0..PROJECT_COUNT {
        let card = doc.append(grid, ElementSpec::new("div").class("project-card"));
        doc.append(
            card,
            ElementSpec::new("img")
                .attr("data-src", &format!("images/project-{}.jpg", i + 1))
                .bounds(2400.0 + 170.0 * i as f64, 150.0),
        );
    }
}

fn experience(doc: &mut MemorySurface, section: ElementRef) {
    for i in 0..3 {
        doc.append(
            section,
            ElementSpec::new("div")
                .class("timeline-item")
                .bounds(3300.0 + 180.0 * i as f64, 150.0),
        );
    }
}

fn contact(doc: &mut MemorySurface, section: ElementRef) {
    let card = doc.append(
        section,
        ElementSpec::new("div").class("contact-card").bounds(4000.0, 500.0),
    );
    let form = doc.append(card, ElementSpec::new("form").id("contactForm"));
    doc.append(form, ElementSpec::new("input").attr("name", "name"));
    doc.append(form, ElementSpec::new("input").attr("name", "email"));
    doc.append(form, ElementSpec::new("textarea").attr("name", "message"));
}
