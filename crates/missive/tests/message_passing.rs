use std::rc::Rc;

use missive::{Block, Class, Dispatch, ExcType, Instance, Message, Object, Receiver, Selector};
use pretty_assertions::assert_eq;

fn message_catcher() -> Rc<Class> {
    Class::new("MessageCatcher")
        .define("caught?", |_this, message| {
            message.check_zero_args()?;
            Ok(Object::Bool(true))
        })
        .define("add_a_payload", |_this, message| {
            let (_, args, _) = message.into_parts();
            Ok(Object::Array(args))
        })
        .build()
}

fn all_message_catcher() -> Rc<Class> {
    Class::new("AllMessageCatcher")
        .on_method_missing(|_this, message| {
            let args: Vec<String> = message.args().iter().map(Object::to_s).collect();
            Ok(Object::String(format!(
                "Someone called {} with <{}>",
                message.selector(),
                args.join(", ")
            )))
        })
        .build()
}

fn well_behaved_foo_catcher() -> Rc<Class> {
    Class::new("WellBehavedFooCatcher")
        .on_method_missing(|this, message| {
            if message.selector().starts_with("foo") {
                Ok(Object::from("Foo to you too"))
            } else {
                this.super_method_missing(&message)
            }
        })
        .build()
}

#[test]
fn methods_can_be_called_by_sending_the_message() {
    let mut mc = Instance::new(&message_catcher());

    assert_eq!(mc.send(Message::new("caught?")).unwrap(), Object::Bool(true));
    assert_eq!(
        mc.send(Message::new("send").arg(Object::symbol("caught?"))).unwrap(),
        Object::Bool(true)
    );
}

#[test]
fn methods_can_be_invoked_more_dynamically() {
    let mut mc = Instance::new(&message_catcher());

    assert!(mc.send(Message::new("send").arg("caught?")).unwrap().is_truthy());

    let built = Object::from("caught").send(Message::new("+").arg("?")).unwrap();
    assert!(mc.send(Message::new("send").arg(built)).unwrap().is_truthy());

    let lowered = Object::from("CAUGHT?").send(Message::new("downcase")).unwrap();
    assert!(mc.send(Message::new("send").arg(lowered)).unwrap().is_truthy());
}

#[test]
fn send_with_underscores_also_sends_messages() {
    let mut mc = Instance::new(&message_catcher());

    assert_eq!(
        mc.send(Message::new("__send__").arg(Object::symbol("caught?"))).unwrap(),
        Object::Bool(true)
    );
    assert_eq!(
        mc.send(Message::new("public_send").arg(Object::symbol("caught?"))).unwrap(),
        Object::Bool(true)
    );
}

#[test]
fn send_without_a_usable_name_raises() {
    let mut mc = Instance::new(&message_catcher());

    let error = mc.send(Message::new("send")).unwrap_err();
    assert_eq!(error.exc_type(), ExcType::ArgumentError);
    assert_eq!(error.message(), "no method name given");

    let error = mc.send(Message::new("send").arg(42)).unwrap_err();
    assert_eq!(error.exc_type(), ExcType::TypeError);
    assert_eq!(error.message(), "42 is not a symbol nor a string");
}

#[test]
fn objects_can_be_asked_if_they_know_how_to_respond() {
    let mut mc = Instance::new(&message_catcher());

    assert!(mc.respond_to("caught?"));
    assert!(!mc.respond_to("does_not_exist"));
    assert_eq!(
        mc.send(Message::new("respond_to?").arg(Object::symbol("caught?"))).unwrap(),
        Object::Bool(true)
    );
    assert_eq!(
        mc.send(Message::new("respond_to?").arg(Object::symbol("does_not_exist"))).unwrap(),
        Object::Bool(false)
    );
}

#[test]
fn kernel_operations_are_advertised_except_method_missing() {
    let mc = Instance::new(&message_catcher());

    for kernel in ["send", "__send__", "public_send", "respond_to?", "class", "inspect", "nil?"] {
        assert!(mc.respond_to(kernel), "{kernel}");
    }
    assert!(!mc.respond_to("method_missing"));
}

#[test]
fn public_send_refuses_method_missing() {
    let mut mc = Instance::new(&message_catcher());

    let error = mc
        .send(Message::new("public_send").arg(Object::symbol("method_missing")).arg(Object::symbol("caught?")))
        .unwrap_err();
    assert_eq!(error.exc_type(), ExcType::NoMethodError);
    assert!(error.message().contains("method_missing"));
}

#[test]
fn sending_a_message_with_arguments() {
    let mut mc = Instance::new(&message_catcher());

    assert_eq!(mc.send(Message::new("add_a_payload")).unwrap(), Object::Array(vec![]));
    assert_eq!(
        mc.send(Message::new("send").arg(Object::symbol("add_a_payload"))).unwrap(),
        Object::Array(vec![])
    );

    let payload = vec![Object::Int(3), Object::Int(4), Object::Nil, Object::Int(6)];
    assert_eq!(
        mc.send(Message::with_args("add_a_payload", payload.clone())).unwrap(),
        Object::Array(payload.clone())
    );

    let mut args = vec![Object::symbol("add_a_payload")];
    args.extend(payload.iter().cloned());
    assert_eq!(
        mc.send(Message::with_args("send", args)).unwrap(),
        Object::Array(payload)
    );
}

#[test]
fn sending_undefined_messages_to_a_typical_object_raises() {
    let typical_object = Class::new("TypicalObject").build();
    let mut typical = Instance::new(&typical_object);

    let error = typical.send(Message::new("foobar")).unwrap_err();
    assert_eq!(error.exc_type(), ExcType::NoMethodError);
    assert!(error.is_a(ExcType::NameError));
    assert_eq!(error.message(), "undefined method 'foobar' for an instance of TypicalObject");
    assert_eq!(error.name(), Some(&Selector::from("foobar")));
}

#[test]
fn calling_method_missing_raises_no_method_error() {
    let typical_object = Class::new("TypicalObject").build();
    let mut typical = Instance::new(&typical_object);

    let error = typical
        .send(Message::new("method_missing").arg(Object::symbol("foobar")))
        .unwrap_err();
    assert_eq!(error.exc_type(), ExcType::NoMethodError);
    assert!(error.message().contains("foobar"));
}

#[test]
fn all_messages_are_caught() {
    let mut catcher = Instance::new(&all_message_catcher());

    assert_eq!(
        catcher.send(Message::new("foobar")).unwrap(),
        Object::from("Someone called foobar with <>")
    );
    assert_eq!(
        catcher.send(Message::new("foobaz").arg(1)).unwrap(),
        Object::from("Someone called foobaz with <1>")
    );
    let sum = Message::with_args("sum", (1..=6_i64).map(Object::from).collect());
    assert_eq!(
        catcher.send(sum).unwrap(),
        Object::from("Someone called sum with <1, 2, 3, 4, 5, 6>")
    );
}

#[test]
fn explicit_method_missing_reaches_the_handler() {
    let mut catcher = Instance::new(&all_message_catcher());

    assert_eq!(
        catcher
            .send(Message::new("method_missing").arg(Object::symbol("foobar")).arg(2))
            .unwrap(),
        Object::from("Someone called foobar with <2>")
    );
}

#[test]
fn catching_messages_makes_respond_to_lie() {
    let mut catcher = Instance::new(&all_message_catcher());

    assert!(catcher.send(Message::new("any_method")).is_ok());
    assert!(!catcher.respond_to("any_method"));
}

#[test]
fn foo_methods_are_caught() {
    let mut catcher = Instance::new(&well_behaved_foo_catcher());

    assert_eq!(catcher.send(Message::new("foo_bar")).unwrap(), Object::from("Foo to you too"));
    assert_eq!(catcher.send(Message::new("foo_baz")).unwrap(), Object::from("Foo to you too"));
}

#[test]
fn non_foo_messages_are_treated_normally() {
    let mut catcher = Instance::new(&well_behaved_foo_catcher());

    let error = catcher.send(Message::new("normal_undefined_method")).unwrap_err();
    assert_eq!(error.exc_type(), ExcType::NoMethodError);
    assert!(error.message().contains("WellBehavedFooCatcher"));
}

#[test]
fn explicitly_implementing_respond_to_lets_objects_tell_the_truth() {
    let original = well_behaved_foo_catcher();
    let before = Instance::new(&original);

    let reopened = Class::reopen(&original)
        .on_respond_to_missing(|selector| selector.starts_with("foo"))
        .build();
    let catcher = Instance::new(&reopened);

    assert!(catcher.respond_to("foo_bar"));
    assert!(!catcher.respond_to("something_else"));
    // instances of the class as it was before reopening keep the old behavior
    assert!(!before.respond_to("foo_bar"));
}

#[test]
fn attribute_accessors_store_instance_variables() {
    let point = Class::new("Point").attr_accessor("x").attr_reader("y").build();
    let mut p = Instance::new(&point);

    assert_eq!(p.send(Message::new("x")).unwrap(), Object::Nil);
    assert_eq!(p.send(Message::new("x=").arg(3)).unwrap(), Object::Int(3));
    assert_eq!(p.send(Message::new("x")).unwrap(), Object::Int(3));
    assert!(!p.respond_to("y="));
    assert_eq!(p.inspect(), "#<Point @x=3>");
    assert_eq!(
        point.method_names().map(Selector::as_str).collect::<Vec<_>>(),
        ["x", "x=", "y"]
    );
}

#[test]
fn kernel_class_and_inspect() {
    let mut mc = Instance::new(&message_catcher());

    assert_eq!(mc.send(Message::new("class")).unwrap(), Object::from("MessageCatcher"));
    assert_eq!(mc.send(Message::new("inspect")).unwrap(), Object::from("#<MessageCatcher>"));
    assert_eq!(mc.send(Message::new("nil?")).unwrap(), Object::Bool(false));
    assert_eq!(
        mc.send(Message::new("instance_of?").arg("MessageCatcher")).unwrap(),
        Object::Bool(true)
    );
}

#[test]
fn defined_methods_shadow_kernel_operations() {
    let loud = Class::new("Loud")
        .define("class", |_this, _message| Ok(Object::from("not telling")))
        .build();
    let mut instance = Instance::new(&loud);

    assert_eq!(instance.send(Message::new("class")).unwrap(), Object::from("not telling"));
}

#[test]
fn every_object_answers_identity_comparison() {
    let mut mc = Instance::new(&message_catcher());

    assert_eq!(mc.send(Message::new("==").arg(1)).unwrap(), Object::Bool(false));
    assert_eq!(mc.send(Message::new("!=").arg(Object::Nil)).unwrap(), Object::Bool(true));
    assert_eq!(mc.send(Message::new("!")).unwrap(), Object::Bool(false));
    assert!(mc.respond_to("=="));

    let error = mc.send(Message::new("==")).unwrap_err();
    assert_eq!(error.exc_type(), ExcType::ArgumentError);

    // copying is only built in for plain values
    let error = mc.send(Message::new("dup")).unwrap_err();
    assert_eq!(error.exc_type(), ExcType::NoMethodError);
}

#[test]
fn methods_see_the_block_they_were_sent_with() {
    let yielder = Class::new("Yielder")
        .define("block_given?", |_this, message| Ok(Object::Bool(message.block().is_some())))
        .build();
    let mut y = Instance::new(&yielder);

    assert_eq!(y.send(Message::new("block_given?")).unwrap(), Object::Bool(false));
    let with_block = Message::new("block_given?").with_block(Block::new(|_| Ok(Object::Nil)));
    assert_eq!(y.send(with_block).unwrap(), Object::Bool(true));

    let via_send = Message::new("send")
        .arg(Object::symbol("block_given?"))
        .with_block(Block::new(|_| Ok(Object::Nil)));
    assert_eq!(y.send(via_send).unwrap(), Object::Bool(true));
}
