use seed::{prelude::*, *};
use shared::form::POST_ERROR_MESSAGE;
use shared::{ApiResult, Directory, Employee, EmployeeForm, Field, SubmitOutcome};

use crate::Client;

pub enum Msg {
    Input(Field, String),
    Blur(Field),
    Submit,
    Created(Employee, ApiResult<()>),
    DismissMessage,
    DismissPostError,
}

pub fn update(msg: Msg, directory: &mut Directory, client: &Client, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Input(field, value) => {
            directory.form.input(field, value);
        }

        Msg::Blur(field) => {
            directory.form.blur(field);
        }

        Msg::Submit => match directory.begin_submit() {
            SubmitOutcome::Dispatch(employee) => {
                let client = client.clone();
                orders.perform_cmd(async move {
                    let result = shared::employees::create_employee(&client, &employee).await;
                    Msg::Created(employee, result)
                });
            }
            SubmitOutcome::Rejected(message) => {
                log!("form rejected:", message.text());
            }
            SubmitOutcome::NotLoaded | SubmitOutcome::InFlight => {
                orders.skip();
            }
        },

        Msg::Created(employee, result) => {
            if let Err(err) = &result {
                error!("could not create employee:", err.to_string());
            }
            directory.finish_submit(employee, result);
        }

        Msg::DismissMessage => {
            directory.form.dismiss_message();
        }

        Msg::DismissPostError => {
            directory.form.dismiss_post_error();
        }
    }
}

pub fn view(directory: &Directory) -> Node<Msg> {
    let state = &directory.form;
    div![
        C!["form__wrapper"],
        h1!["Add new employee form"],
        form![
            C!["form"],
            attrs! {At::from("novalidate") => AtValue::None},
            ev(Ev::Submit, |event| {
                event.prevent_default();
                Msg::Submit
            }),
            div![
                C!["form__form-controll"],
                Field::ALL
                    .iter()
                    .map(|field| field_view(state, *field))
                    .collect::<Vec<_>>(),
            ],
            div![C!["form__button"], buttons(state)],
        ]
    ]
}

fn buttons(state: &EmployeeForm) -> Vec<Node<Msg>> {
    if state.is_submitting() {
        return nodes![crate::spinner()];
    }
    nodes![
        state
            .message()
            .map(|message| crate::alert(message.text(), || Msg::DismissMessage)),
        button![
            C!["btn btn-outline-primary btn-lg"],
            attrs! {At::Type => "submit"},
            "Add new employee"
        ],
        IF!(state.has_post_error() => crate::alert(POST_ERROR_MESSAGE, || Msg::DismissPostError)),
    ]
}

fn field_view(state: &EmployeeForm, field: Field) -> Node<Msg> {
    let input_type = match field {
        Field::Age | Field::Salary => "number",
        Field::Email => "email",
        _ => "text",
    };
    div![
        C!["form-group"],
        label![field.label()],
        input![
            C!["form-control", IF!(!state.is_valid(field) => "is-invalid")],
            attrs! {
                At::Type => input_type,
                At::Value => state.value(field),
                At::Placeholder => field.label(),
                At::Required => AtValue::None,
            },
            input_ev(Ev::Input, move |value| Msg::Input(field, value)),
            ev(Ev::Blur, move |_| Msg::Blur(field)),
        ],
    ]
}
