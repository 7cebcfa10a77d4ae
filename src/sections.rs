use std::rc::Rc;

use folio::contact::{ContactForm, MailRelay, RelayError, Submission, NOTICE_TIMEOUT_MS};
use folio::content::{
    footer_text, ABOUT_PARAGRAPHS, CERTIFICATIONS, CONTACT_LEAD, EDUCATION, EXPERIENCE,
    HERO_VIDEO, PORTRAIT, PROJECTS, RESUME, SIGNATURE, SKILL_CATEGORIES, SOCIAL_LINKS,
};
use folio::disclosure::Disclosure;
use folio::easing::{Easing, GLIDE_OUT, INK_DROP, SOFT_OUT};
use folio::media::{GateAction, MediaGate};
use folio::reveal::{
    corner_offset, scroll_progress, stagger, Entrance, Pose, ABOUT_OPACITY, ABOUT_SCALE,
};
use folio::scroll::ScrollSnapshot;
use folio::telemetry::Logger;
use folio::visibility::VisibilityMode;
use gloo::timers::callback::Timeout;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::browser::{self, EmailJsRelay, NodeMedia};
use crate::frontend::{use_in_view, use_site};

const HEADING_RISE: Entrance = Entrance::new(Pose::hidden().offset(0.0, 50.0), 1.0, Easing::EaseOut);

fn log_gate_action(logger: &Logger, action: &GateAction) {
    match action {
        GateAction::Started => logger.debug("media.started", json!({})),
        GateAction::StartRejected(error) => {
            logger.debug("media.play_rejected", json!({ "reason": error.to_string() }))
        }
        GateAction::Paused => logger.debug("media.paused", json!({})),
        GateAction::PausedAtEnd => logger.debug("media.ended", json!({})),
    }
}

#[function_component(HeroSection)]
pub fn hero_section() -> Html {
    let site = use_site();
    let section = use_node_ref();
    let video = use_node_ref();
    let in_view = use_in_view(section.clone(), VisibilityMode::Reentrant, "0px 0px -50% 0px");
    let gate = use_mut_ref(MediaGate::new);

    {
        let gate = gate.clone();
        let media = NodeMedia::new(video.clone(), site.logger);
        let logger = site.logger;
        use_effect_with(in_view, move |in_view| {
            if let Some(action) = gate.borrow_mut().on_visibility(&media, *in_view) {
                log_gate_action(&logger, &action);
            }
            || ()
        });
    }

    let onended = {
        let media = NodeMedia::new(video.clone(), site.logger);
        let logger = site.logger;
        Callback::from(move |_: Event| {
            let action = gate.borrow().on_ended(&media);
            log_gate_action(&logger, &action);
        })
    };

    html! {
        <section id="hero" class="hero" ref={section}>
            <video ref={video} class="hero-video" src={HERO_VIDEO} muted=true playsinline=true {onended}></video>
        </section>
    }
}

#[function_component(AboutSection)]
pub fn about_section() -> Html {
    let site = use_site();
    let section = use_node_ref();
    let visible = use_in_view(section.clone(), VisibilityMode::Reentrant, "-100px");
    let scroll_pose = use_state_eq(|| (ABOUT_OPACITY.sample(0.0), ABOUT_SCALE.sample(0.0)));

    {
        let scroll_pose = scroll_pose.clone();
        let hub = Rc::clone(&site.hub);
        use_effect_with(section.clone(), move |section| {
            let section = section.clone();
            let follow = move |snapshot: ScrollSnapshot| {
                if let Some(rect) = browser::node_rect(&section) {
                    let progress = scroll_progress(rect, snapshot.viewport);
                    scroll_pose.set((ABOUT_OPACITY.sample(progress), ABOUT_SCALE.sample(progress)));
                }
            };

            if let Some(snapshot) = browser::snapshot() {
                follow(snapshot);
            }
            let subscription = hub.subscribe(follow);

            move || drop(subscription)
        });
    }

    let body = Entrance::new(Pose::hidden().offset(0.0, -100.0), 1.2, INK_DROP);
    let portrait = Entrance::new(Pose::hidden().scaled(0.9), 1.0, Easing::EaseOut).delayed(0.4);
    let actions = Entrance::new(Pose::hidden().offset(0.0, 20.0), 0.8, Easing::EaseOut).delayed(0.9);
    let copy = Entrance::new(Pose::hidden().offset(0.0, -80.0), 1.2, INK_DROP).delayed(0.6);
    let (opacity, scale) = *scroll_pose;

    html! {
        <section id="about" class="about" ref={section}>
            <div class="scroll-linked" style={format!("opacity: {opacity:.3}; transform: scale({scale:.3});")}>
                <div class="about-body" style={body.style(visible)}>
                    <h2 class="section-title">{"The Writer"}</h2>
                    <div class="about-grid">
                        <div class="about-aside">
                            <div class="portrait" style={portrait.style(visible)}>
                                <img src={PORTRAIT} alt="Keerthi Tadikonda - Full Stack Developer" />
                            </div>
                            <div class="about-actions" style={actions.style(visible)}>
                                <a class="button" href={RESUME} target="_blank" rel="noopener noreferrer">{"View Resume"}</a>
                            </div>
                        </div>
                        <div class="about-copy" style={copy.style(visible)}>
                            { for ABOUT_PARAGRAPHS.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}

/// One item of a staggered list, rendered by position in its catalog.
#[derive(Properties, PartialEq)]
struct EntryProps {
    index: usize,
    visible: bool,
}

#[function_component(EducationEntry)]
fn education_entry(props: &EntryProps) -> Html {
    let hover = use_state(Disclosure::default);
    let Some(entry) = EDUCATION.get(props.index) else {
        return html! {};
    };
    let entrance = Entrance::new(
        Pose::hidden().offset(-20.0, 30.0).scaled(0.95).blurred(10.0),
        0.8,
        SOFT_OUT,
    )
    .delayed(stagger(0.8, 0.15, props.index));

    let onmouseenter = {
        let hover = hover.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *hover;
            next.pointer_enter();
            hover.set(next);
        })
    };
    let onmouseleave = {
        let hover = hover.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *hover;
            next.pointer_leave();
            hover.set(next);
        })
    };

    html! {
        <div
            class={classes!("timeline-entry", hover.expanded().then_some("is-hovered"))}
            style={entrance.style(props.visible)}
            {onmouseenter}
            {onmouseleave}
        >
            <span class="timeline-dot"></span>
            <p class="timeline-period">{entry.period}</p>
            <h4>{entry.degree}</h4>
            <p class="timeline-institution">{entry.institution}</p>
            <p class="muted">{format!("({})", entry.grade)}</p>
        </div>
    }
}

#[function_component(ProjectCard)]
fn project_card(props: &EntryProps) -> Html {
    let disclosure = use_state(Disclosure::default);
    let Some(project) = PROJECTS.get(props.index) else {
        return html! {};
    };
    let entrance = Entrance::new(
        Pose::hidden()
            .offset(0.0, 50.0)
            .scaled(0.85)
            .rotated(-5.0)
            .blurred(15.0),
        0.8,
        SOFT_OUT,
    )
    .delayed(stagger(1.0, 0.12, props.index));

    let onmouseenter = {
        let disclosure = disclosure.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *disclosure;
            next.pointer_enter();
            disclosure.set(next);
        })
    };
    let onmouseleave = {
        let disclosure = disclosure.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *disclosure;
            next.pointer_leave();
            disclosure.set(next);
        })
    };

    html! {
        <article class="project-card" style={entrance.style(props.visible)} {onmouseenter} {onmouseleave}>
            if let Some(thumbnail) = project.thumbnail {
                <div class="project-thumb">
                    <img src={thumbnail} alt={project.title} loading="lazy" />
                </div>
            }
            <div class="project-body">
                <h4 class={classes!(disclosure.expanded().then_some("is-accented"))}>{project.title}</h4>
                <div class="project-description" style={disclosure.style().css()}>
                    <p>{project.description}</p>
                </div>
                <ul class="tag-list">
                    { for project.tags.iter().map(|tag| html! { <li>{*tag}</li> }) }
                </ul>
                <a class="button gilded" href={project.link} target="_blank" rel="noopener noreferrer">
                    {"View on GitHub"}
                </a>
            </div>
        </article>
    }
}

#[function_component(ExperienceSection)]
pub fn experience_section() -> Html {
    let section = use_node_ref();
    let visible = use_in_view(section.clone(), VisibilityMode::Latched, "-100px");

    let title = Entrance::new(Pose::hidden().offset(0.0, -30.0), 0.8, SOFT_OUT).delayed(0.1);
    let left_heading = Entrance::new(Pose::hidden().offset(-20.0, 0.0), 0.6, SOFT_OUT).delayed(0.3);
    let right_heading = Entrance::new(Pose::hidden().offset(20.0, 0.0), 0.6, SOFT_OUT).delayed(0.3);
    let projects_block = Entrance::new(Pose::hidden().offset(0.0, 30.0), 0.8, SOFT_OUT).delayed(0.6);

    let roles = EXPERIENCE.iter().enumerate().map(|(index, role)| {
        let card = Entrance::new(
            Pose::hidden()
                .offset(40.0, 20.0)
                .scaled(0.9)
                .rotated(-5.0)
                .blurred(10.0),
            0.8,
            SOFT_OUT,
        )
        .delayed(stagger(0.8, 0.2, index));

        html! {
            <div class="role-card" style={card.style(visible)}>
                <p class="timeline-period">{role.period}</p>
                <h4>{role.title}</h4>
                <p class="timeline-institution">{role.company}</p>
                <p>{role.description}</p>
                <ul class="tag-list">
                    { for role.tags.iter().enumerate().map(|(tag_index, tag)| {
                        let pop = Entrance::new(Pose::hidden().scaled(0.0).rotated(-10.0), 0.4, Easing::BackOut(1.7))
                            .delayed(stagger(stagger(1.5, 0.2, index), 0.1, tag_index));
                        html! { <li style={pop.style(visible)}>{*tag}</li> }
                    }) }
                </ul>
            </div>
        }
    });

    html! {
        <section id="experience" class="experience" ref={section}>
            <h2 class="section-title" style={title.style(visible)}>{"The Chronicle"}</h2>
            <div class="chronicle-grid">
                <div>
                    <h3 style={left_heading.style(visible)}>{"Education"}</h3>
                    <div class="timeline">
                        { for (0..EDUCATION.len()).map(|index| html! { <EducationEntry {index} {visible} /> }) }
                    </div>
                </div>
                <div>
                    <h3 style={right_heading.style(visible)}>{"Professional Journey"}</h3>
                    { for roles }
                </div>
            </div>
            <div class="projects" style={projects_block.style(visible)}>
                <h3>{"Notable Works"}</h3>
                <div class="project-grid">
                    { for (0..PROJECTS.len()).map(|index| html! { <ProjectCard {index} {visible} /> }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(SkillsSection)]
pub fn skills_section() -> Html {
    let section = use_node_ref();
    let visible = use_in_view(section.clone(), VisibilityMode::Reentrant, "-100px");

    html! {
        <section id="skills" class="skills" ref={section}>
            <div style={HEADING_RISE.style(visible)}>
                <h2 class="section-title">{"The Seals & Stamps"}</h2>
                <div class="skill-grid">
                    { for SKILL_CATEGORIES.iter().enumerate().map(|(index, category)| {
                        let (x, y) = corner_offset(index);
                        let card = Entrance::new(Pose::hidden().offset(x, y).scaled(0.5), 0.75, SOFT_OUT)
                            .delayed(stagger(0.2, 0.15, index));
                        html! {
                            <div class="skill-card" style={card.style(visible)}>
                                <div class="seal">
                                    <span class="seal-icon">{category.icon}</span>
                                    <h3>{category.name}</h3>
                                </div>
                                <ul class="tag-list">
                                    { for category.skills.iter().map(|skill| html! { <li>{*skill}</li> }) }
                                </ul>
                            </div>
                        }
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(CertificationsSection)]
pub fn certifications_section() -> Html {
    let section = use_node_ref();
    let visible = use_in_view(section.clone(), VisibilityMode::Latched, "-150px");
    let heading = Entrance::new(Pose::hidden().offset(0.0, 30.0), 1.0, Easing::EaseOut);

    html! {
        <section id="certifications" class="certifications" ref={section}>
            <h2 class="section-title" style={heading.style(visible)}>{"Credentials & Accolades"}</h2>
            <div class="certificate-grid">
                { for CERTIFICATIONS.iter().enumerate().map(|(index, cert)| {
                    let card = Entrance::new(Pose::hidden().offset(0.0, 60.0).scaled(0.9), 0.8, GLIDE_OUT)
                        .delayed(stagger(0.2, 0.1, index));
                    html! {
                        <div class="certificate" style={card.style(visible)}>
                            <div>
                                <p class="muted">{"Awarded by"}</p>
                                <h3>{cert.issuer}</h3>
                            </div>
                            <div class="certificate-title">
                                <h4>{cert.title}</h4>
                                <p>{cert.description}</p>
                            </div>
                            <p class="muted">{cert.date}</p>
                        </div>
                    }
                }) }
            </div>
        </section>
    }
}

#[function_component(ContactSection)]
pub fn contact_section() -> Html {
    let site = use_site();
    let section = use_node_ref();
    let visible = use_in_view(section.clone(), VisibilityMode::Latched, "-100px");
    let form = use_mut_ref(ContactForm::new);
    let rerender = use_force_update();

    let (notice, serial) = {
        let form = form.borrow();
        (form.notice().cloned(), form.notice_serial())
    };
    {
        let form = form.clone();
        let rerender = rerender.clone();
        let showing = notice.is_some();
        use_effect_with((serial, showing), move |&(_, showing)| {
            let timeout = showing.then(|| {
                Timeout::new(NOTICE_TIMEOUT_MS, move || {
                    form.borrow_mut().dismiss_notice();
                    rerender.force_update();
                })
            });
            move || drop(timeout)
        });
    }

    let on_name = {
        let form = form.clone();
        let rerender = rerender.clone();
        Callback::from(move |event: InputEvent| {
            form.borrow_mut().fields.name = event.target_unchecked_into::<HtmlInputElement>().value();
            rerender.force_update();
        })
    };
    let on_email = {
        let form = form.clone();
        let rerender = rerender.clone();
        Callback::from(move |event: InputEvent| {
            form.borrow_mut().fields.email = event.target_unchecked_into::<HtmlInputElement>().value();
            rerender.force_update();
        })
    };
    let on_message = {
        let form = form.clone();
        let rerender = rerender.clone();
        Callback::from(move |event: InputEvent| {
            form.borrow_mut().fields.message =
                event.target_unchecked_into::<HtmlTextAreaElement>().value();
            rerender.force_update();
        })
    };

    let on_submit = {
        let form = form.clone();
        let rerender = rerender.clone();
        let config = Rc::clone(&site.config);
        let logger = site.logger;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let submission = form.borrow_mut().begin_submission(config.relay.as_ref());

            match submission {
                Submission::Dispatch(request) => {
                    logger.info("contact.submit", json!({}));
                    let form = Rc::clone(&form);
                    let rerender = rerender.clone();
                    let config = Rc::clone(&config);
                    spawn_local(async move {
                        let outcome = match config.relay.as_ref() {
                            Some(settings) => EmailJsRelay::new(settings).deliver(&request).await,
                            None => Err(RelayError::Transport("relay settings vanished".to_string())),
                        };
                        match &outcome {
                            Ok(()) => logger.info("contact.sent", json!({})),
                            Err(error) => logger.warn("contact.failed", json!({ "error": error.to_string() })),
                        }
                        form.borrow_mut().finish_submission(outcome);
                        rerender.force_update();
                    });
                }
                Submission::NotConfigured(_) => logger.warn("contact.not_configured", json!({})),
                Submission::AlreadySubmitting => {}
            }
            rerender.force_update();
        })
    };

    let on_dismiss = {
        let form = form.clone();
        let rerender = rerender.clone();
        Callback::from(move |_: MouseEvent| {
            form.borrow_mut().dismiss_notice();
            rerender.force_update();
        })
    };

    let current = form.borrow();
    let container = HEADING_RISE;
    let title = Entrance::new(Pose::hidden().offset(0.0, 40.0), 1.2, SOFT_OUT).delayed(0.1);
    let card = Entrance::new(Pose::hidden().offset(0.0, 80.0).scaled(0.95).blurred(10.0), 1.2, GLIDE_OUT)
        .delayed(0.3);
    let signature = Entrance::new(Pose::hidden().offset(0.0, 20.0), 1.2, SOFT_OUT).delayed(1.8);

    html! {
        <section id="contact" class="contact" ref={section}>
            <div style={container.style(visible)}>
                <h2 class="section-title" style={title.style(visible)}>{"The Final Page"}</h2>
                <div class="letter" style={card.style(visible)}>
                    <p class="lead">{CONTACT_LEAD}</p>
                    <form onsubmit={on_submit}>
                        <label for="name">{"Your Name"}</label>
                        <input id="name" name="from_name" placeholder="Ms/Mr" required=true
                            value={current.fields.name.clone()} oninput={on_name} />
                        <label for="email">{"Your Email"}</label>
                        <input id="email" name="from_email" type="email" placeholder="@example.com" required=true
                            value={current.fields.email.clone()} oninput={on_email} />
                        <label for="message">{"Your Message"}</label>
                        <textarea id="message" name="message" rows="6" required=true
                            placeholder="Tell me about your project or idea..."
                            value={current.fields.message.clone()} oninput={on_message} />
                        <button type="submit" class="button" disabled={current.submitting()}>
                            {current.submit_label()}
                        </button>
                    </form>
                    <div class="social-links">
                        { for SOCIAL_LINKS.iter().enumerate().map(|(index, link)| {
                            let entrance = Entrance::new(Pose::hidden().scaled(0.8), 1.0, SOFT_OUT)
                                .delayed(stagger(1.4, 0.1, index));
                            html! {
                                <a href={link.href} target="_blank" rel="noopener noreferrer"
                                    aria-label={link.label} style={entrance.style(visible)}>
                                    {link.label}
                                </a>
                            }
                        }) }
                    </div>
                </div>
                <div class="signature" style={signature.style(visible)}>
                    <p>{"Sincerely,"}</p>
                    <p class="signature-name">{SIGNATURE}</p>
                </div>
            </div>
            if let Some(notice) = notice {
                <div class={classes!("toast", notice.kind.as_str())} role="status" onclick={on_dismiss}>
                    {notice.message}
                </div>
            }
        </section>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <p class="muted">{footer_text(browser::current_year())}</p>
        </footer>
    }
}
